//! Configuration helpers for reading settings from the environment

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// A variable was present but could not be parsed
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid value for {key}: {value:?}")]
pub struct EnvError {
    pub key: String,
    pub value: String,
}

/// Read a variable, treating blank values as unset
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse a variable
///
/// Returns `Ok(None)` when the variable is unset or blank.
pub fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>, EnvError> {
    match env_string(key) {
        None => Ok(None),
        Some(raw) => parse_value(key, &raw).map(Some),
    }
}

/// Read a whole number of seconds as a duration
pub fn env_duration_secs(key: &str) -> Result<Option<Duration>, EnvError> {
    Ok(env_parse::<u64>(key)?.map(Duration::from_secs))
}

/// Read a whole number of milliseconds as a duration
pub fn env_duration_millis(key: &str) -> Result<Option<Duration>, EnvError> {
    Ok(env_parse::<u64>(key)?.map(Duration::from_millis))
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, EnvError> {
    raw.parse().map_err(|_| EnvError {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_variable() {
        assert_eq!(env_string("AGENT_UTILS_TEST_SURELY_UNSET"), None);
        assert_eq!(
            env_parse::<u64>("AGENT_UTILS_TEST_SURELY_UNSET"),
            Ok(None)
        );
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<u64>("K", "42"), Ok(42));

        let err = parse_value::<u64>("K", "soon").unwrap_err();
        assert_eq!(err.key, "K");
        assert_eq!(err.to_string(), "Invalid value for K: \"soon\"");
    }
}
