//! Environment-variable helpers shared by the per-crate config loaders.
//!
//! Loaders take a lookup function instead of reading `std::env` directly
//! so tests can feed them a fixed map.

use std::str::FromStr;

use crate::error::CoreError;

/// Read a variable, treating empty or whitespace-only values as unset.
pub fn optional_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a variable that must be present.
pub fn required_var(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, CoreError> {
    optional_var(lookup, name).ok_or_else(|| CoreError::missing_env(name))
}

/// Read and parse an optional variable. Unset yields `Ok(None)`; a value
/// that fails to parse is an error rather than a silent default.
pub fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    expected: &str,
) -> Result<Option<T>, CoreError> {
    optional_var(lookup, name)
        .map(|v| v.parse().map_err(|_| CoreError::invalid_env(name, expected)))
        .transpose()
}

/// Lookup backed by the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Strip trailing slashes so paths can be appended with `format!`.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn blank_values_read_as_unset() {
        let env = lookup(&[("A", "  ")]);
        assert_eq!(optional_var(&env, "A"), None);
        assert!(required_var(&env, "A").is_err());
    }

    #[test]
    fn parse_var_distinguishes_unset_from_invalid() {
        let env = lookup(&[("N", "12"), ("BAD", "twelve")]);
        assert_eq!(parse_var::<u32>(&env, "N", "u32").unwrap(), Some(12));
        assert_eq!(parse_var::<u32>(&env, "MISSING", "u32").unwrap(), None);
        assert!(parse_var::<u32>(&env, "BAD", "u32").is_err());
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://api.fashn.ai/v1/"),
            "https://api.fashn.ai/v1"
        );
    }
}
