//! Environment loading helpers.
//!
//! Keeps the primary → alias fallback chain in one place so call sites never
//! repeat `or_else` ladders. Every helper has a `lookup_*` twin taking an
//! explicit lookup function, which is what the schema builds on and what the
//! tests drive without touching the process environment.

use std::env;

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// First value found for `primary` or any alias, in order.
fn lookup_raw<L>(lookup: &L, primary: &str, aliases: &[&str]) -> Option<String>
where
    L: Fn(&str) -> Option<String>,
{
    lookup(primary).or_else(|| aliases.iter().find_map(|&a| lookup(a)))
}

/// Read from the primary key or its aliases; empty counts as unset.
pub fn lookup_optional<L>(lookup: &L, primary: &str, aliases: &[&str]) -> Option<String>
where
    L: Fn(&str) -> Option<String>,
{
    lookup_raw(lookup, primary, aliases).and_then(|s| {
        let s = s.trim().to_string();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    })
}

pub fn lookup_or<L, F>(lookup: &L, primary: &str, aliases: &[&str], default: F) -> String
where
    L: Fn(&str) -> Option<String>,
    F: FnOnce() -> String,
{
    lookup_optional(lookup, primary, aliases).unwrap_or_else(default)
}

/// 1/true/yes/on are true, 0/false/no/off are false; any other set value counts as true.
pub fn lookup_bool<L>(lookup: &L, primary: &str, aliases: &[&str], default: bool) -> bool
where
    L: Fn(&str) -> Option<String>,
{
    match lookup_raw(lookup, primary, aliases).as_deref() {
        Some(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        None => default,
    }
}

/// Unparseable values fall back to `default` with a warning.
pub fn lookup_u64<L>(lookup: &L, primary: &str, aliases: &[&str], default: u64) -> u64
where
    L: Fn(&str) -> Option<String>,
{
    match lookup_optional(lookup, primary, aliases) {
        Some(s) => s.parse::<u64>().unwrap_or_else(|_| {
            tracing::warn!("Invalid {}: {:?}, using default ({})", primary, s, default);
            default
        }),
        None => default,
    }
}

pub fn env_optional(primary: &str, aliases: &[&str]) -> Option<String> {
    lookup_optional(&process_env, primary, aliases)
}

pub fn env_or<F>(primary: &str, aliases: &[&str], default: F) -> String
where
    F: FnOnce() -> String,
{
    lookup_or(&process_env, primary, aliases, default)
}

pub fn env_bool(primary: &str, aliases: &[&str], default: bool) -> bool {
    lookup_bool(&process_env, primary, aliases, default)
}

pub fn env_u64(primary: &str, aliases: &[&str], default: u64) -> u64 {
    lookup_u64(&process_env, primary, aliases, default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_primary_wins_over_alias() {
        let l = vars(&[("A", "primary"), ("B", "alias")]);
        assert_eq!(lookup_optional(&l, "A", &["B"]).as_deref(), Some("primary"));
    }

    #[test]
    fn test_alias_used_when_primary_missing() {
        let l = vars(&[("B", "alias")]);
        assert_eq!(lookup_or(&l, "A", &["B"], || "d".into()), "alias");
    }

    #[test]
    fn test_blank_value_is_unset() {
        let l = vars(&[("A", "   ")]);
        assert_eq!(lookup_optional(&l, "A", &[]), None);
        assert_eq!(lookup_or(&l, "A", &[], || "d".into()), "d");
    }

    #[test]
    fn test_bool_parsing() {
        assert!(lookup_bool(&vars(&[("Q", "1")]), "Q", &[], false));
        assert!(lookup_bool(&vars(&[("Q", "Yes")]), "Q", &[], false));
        assert!(!lookup_bool(&vars(&[("Q", "off")]), "Q", &[], true));
        assert!(!lookup_bool(&vars(&[("Q", "0")]), "Q", &[], true));
        assert!(lookup_bool(&vars(&[]), "Q", &[], true));
    }

    #[test]
    fn test_u64_falls_back_on_garbage() {
        assert_eq!(lookup_u64(&vars(&[("T", "45")]), "T", &[], 30), 45);
        assert_eq!(lookup_u64(&vars(&[("T", "soon")]), "T", &[], 30), 30);
        assert_eq!(lookup_u64(&vars(&[]), "T", &[], 30), 30);
    }
}
