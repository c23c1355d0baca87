use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_FILE: &str = "data/project_live.json";
pub const DEFAULT_CHART_PATH: &str = "charts/gospel_analysis.png";
pub const DEFAULT_DASHBOARD_PATH: &str = "gospel_dashboard.html";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_ROLLING_CAPACITY: usize = 100;

/// Consumer configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumerConfig {
    pub data_file: PathBuf,
    pub chart_path: PathBuf,
    pub dashboard_path: PathBuf,
    pub poll_interval: Duration,
    pub rolling_capacity: usize,
    pub rust_log: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.into(),
            chart_path: DEFAULT_CHART_PATH.into(),
            dashboard_path: DEFAULT_DASHBOARD_PATH.into(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            rolling_capacity: DEFAULT_ROLLING_CAPACITY,
            rust_log: "info".to_string(),
        }
    }
}

impl ConsumerConfig {
    /// Load configuration from environment variables
    ///
    /// Every variable is optional; unset variables fall back to the defaults
    /// that match the producer's file layout.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let path_or = |key: &str, default: PathBuf| -> PathBuf {
            lookup(key)
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default)
        };

        let poll_interval_ms = parse_positive(&lookup, "POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?;
        let rolling_capacity =
            parse_positive(&lookup, "ROLLING_CAPACITY", DEFAULT_ROLLING_CAPACITY as u64)? as usize;

        Ok(Self {
            data_file: path_or("GOSPEL_DATA_FILE", defaults.data_file),
            chart_path: path_or("GOSPEL_CHART_PATH", defaults.chart_path),
            dashboard_path: path_or("GOSPEL_DASHBOARD_PATH", defaults.dashboard_path),
            poll_interval: Duration::from_millis(poll_interval_ms),
            rolling_capacity,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_positive<F>(lookup: &F, key: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue(format!("{} must be greater than 0", key))),
        Ok(value) => Ok(value),
        Err(_) => Err(ConfigError::InvalidValue(format!(
            "{} must be a positive integer, got '{}'",
            key, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ConsumerConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, ConsumerConfig::default());
        assert_eq!(config.data_file, PathBuf::from("data/project_live.json"));
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.rolling_capacity, 100);
    }

    #[test]
    fn test_overrides() {
        let config = ConsumerConfig::from_lookup(lookup_from(&[
            ("GOSPEL_DATA_FILE", "/tmp/live.jsonl"),
            ("GOSPEL_CHART_PATH", "out/chart.png"),
            ("POLL_INTERVAL_MS", "250"),
            ("ROLLING_CAPACITY", " 20 "),
        ]))
        .unwrap();

        assert_eq!(config.data_file, PathBuf::from("/tmp/live.jsonl"));
        assert_eq!(config.chart_path, PathBuf::from("out/chart.png"));
        assert_eq!(config.dashboard_path, PathBuf::from(DEFAULT_DASHBOARD_PATH));
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.rolling_capacity, 20);
    }

    #[test]
    fn test_zero_rejected() {
        let err = ConsumerConfig::from_lookup(lookup_from(&[("ROLLING_CAPACITY", "0")])).unwrap_err();
        assert!(err.to_string().contains("ROLLING_CAPACITY"));
    }

    #[test]
    fn test_garbage_rejected() {
        let err = ConsumerConfig::from_lookup(lookup_from(&[("POLL_INTERVAL_MS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }
}
