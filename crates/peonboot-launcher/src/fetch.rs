//! Delegate download for fallback mode.
//!
//! One GET, no retries. Downloading and staging are separate steps: nothing
//! touches the filesystem until the body is in memory. The staged copy is a
//! `NamedTempFile` which removes itself when dropped.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use tempfile::NamedTempFile;

use crate::error::{FetchError, LaunchError};

/// Sent with every request; matches the upstream installer.
pub const USER_AGENT: &str = "peon-ping-installer";

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Source of remote script bodies.
pub trait ScriptFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP fetcher.
#[cfg(feature = "fetch")]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

#[cfg(feature = "fetch")]
impl HttpFetcher {
    pub fn new(read_timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout_read(read_timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }
}

#[cfg(feature = "fetch")]
impl ScriptFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        use std::io::Read;

        let resp = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => FetchError::Status {
                url: url.to_string(),
                status,
            },
            ureq::Error::Transport(t) => FetchError::Transport {
                url: url.to_string(),
                message: describe_transport(&t),
            },
        })?;

        let mut bytes = Vec::new();
        resp.into_reader()
            .read_to_end(&mut bytes)
            .map_err(|source| FetchError::Body {
                url: url.to_string(),
                source,
            })?;
        Ok(bytes)
    }
}

/// Kind, message and cause of a transport failure, without the URL that
/// `Transport`'s own `Display` repeats.
#[cfg(feature = "fetch")]
fn describe_transport(t: &ureq::Transport) -> String {
    let mut out = t.kind().to_string();
    if let Some(message) = t.message() {
        out.push_str(": ");
        out.push_str(message);
    }
    if let Some(cause) = std::error::Error::source(t) {
        out.push_str(": ");
        out.push_str(&cause.to_string());
    }
    out
}

/// Stand-in used when the crate is built without the `fetch` feature.
pub struct OfflineFetcher;

impl ScriptFetcher for OfflineFetcher {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        Err(FetchError::Disabled)
    }
}

/// The fetcher the binaries use.
pub fn default_fetcher(read_timeout: Duration) -> Box<dyn ScriptFetcher> {
    #[cfg(feature = "fetch")]
    return Box::new(HttpFetcher::new(read_timeout));

    #[cfg(not(feature = "fetch"))]
    {
        let _ = read_timeout;
        Box::new(OfflineFetcher)
    }
}

/// Fetch the body of `script_name` from `url`. Nothing is written to disk.
pub fn download(
    fetcher: &dyn ScriptFetcher,
    url: &str,
    script_name: &str,
) -> Result<Vec<u8>, FetchError> {
    tracing::info!("Downloading {} from {}", script_name, url);
    fetcher.fetch(url)
}

/// Write `body` to a new temp file named after `script_name`, created in
/// `staging_dir` or the system temp dir.
pub fn write_temp(
    body: &[u8],
    script_name: &str,
    staging_dir: Option<&Path>,
) -> Result<NamedTempFile, LaunchError> {
    let (stem, suffix) = match script_name.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{}", ext)),
        None => (script_name, String::new()),
    };
    let prefix = format!("peon-{}-", stem);
    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(&suffix);
    let mut file = match staging_dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(LaunchError::TempFile)?;
    file.write_all(body).map_err(LaunchError::TempFile)?;
    file.flush().map_err(LaunchError::TempFile)?;

    tracing::debug!(
        path = %file.path().display(),
        bytes = body.len(),
        "Delegate staged"
    );
    Ok(file)
}
