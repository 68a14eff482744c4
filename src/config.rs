//! Runtime configuration
//!
//! Loaded from the environment (an optional `.env` file is read first);
//! CLI flags override individual fields. Scoring tables are not configurable.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{MindwatchError, Result};

pub const ENV_ADDR: &str = "MINDWATCH_ADDR";
pub const ENV_LOG: &str = "MINDWATCH_LOG";
pub const ENV_MAX_SESSIONS: &str = "MINDWATCH_MAX_SESSIONS";
pub const ENV_BROADCAST_CAPACITY: &str = "MINDWATCH_BROADCAST_CAPACITY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Listen address for the API server
    pub addr: String,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
    /// Concurrent face sessions held by the server
    pub max_sessions: usize,
    /// Buffered live updates per session
    pub broadcast_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            log_level: "info".to_string(),
            max_sessions: 64,
            broadcast_capacity: 100,
        }
    }
}

impl Config {
    /// Load from the process environment, reading `.env` if present
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(addr) = lookup(ENV_ADDR) {
            config.addr = addr;
        }
        if let Some(level) = lookup(ENV_LOG) {
            config.log_level = level;
        }
        if let Some(raw) = lookup(ENV_MAX_SESSIONS) {
            config.max_sessions = parse_positive(ENV_MAX_SESSIONS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_BROADCAST_CAPACITY) {
            config.broadcast_capacity = parse_positive(ENV_BROADCAST_CAPACITY, &raw)?;
        }
        Ok(config)
    }
}

fn parse_positive<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr + PartialOrd + Default,
{
    let value: T = raw
        .trim()
        .parse()
        .map_err(|_| MindwatchError::Config(format!("{key}: '{raw}' is not a number")))?;
    if value <= T::default() {
        return Err(MindwatchError::Config(format!("{key} must be positive")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (ENV_ADDR, "0.0.0.0:8080"),
            (ENV_LOG, "debug"),
            (ENV_MAX_SESSIONS, " 8 "),
            (ENV_BROADCAST_CAPACITY, "16"),
        ]))
        .unwrap();
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.max_sessions, 8);
        assert_eq!(config.broadcast_capacity, 16);
    }

    #[test]
    fn test_invalid_number_rejected() {
        let err = Config::from_lookup(lookup(&[(ENV_MAX_SESSIONS, "many")])).unwrap_err();
        assert!(matches!(err, MindwatchError::Config(_)));
    }

    #[test]
    fn test_zero_rejected() {
        let err = Config::from_lookup(lookup(&[(ENV_BROADCAST_CAPACITY, "0")])).unwrap_err();
        assert!(matches!(err, MindwatchError::Config(_)));
    }
}
