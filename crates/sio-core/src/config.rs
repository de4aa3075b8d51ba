//! Configuration resolution for `sio` streams.
//!
//! Resolution order (lowest to highest priority):
//! 1. Built-in defaults
//! 2. JSON config file (optional)
//! 3. Environment variables (`SIO_MAX_RECORD_BYTES`, `SIO_READ_CAPACITY`,
//!    `SIO_INVALID_UTF8`)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Default record size limit, matching the classic line-scanner token limit.
pub const DEFAULT_MAX_RECORD_BYTES: usize = 64 * 1024;

/// Default number of bytes requested from the source per upstream read.
pub const DEFAULT_READ_CAPACITY: usize = 4096;

/// What to do with a record that is not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Utf8Policy {
    /// Fail the stream with [`Error::InvalidUtf8`].
    #[default]
    Reject,
    /// Replace invalid sequences with U+FFFD before filtering.
    Lossy,
}

impl std::str::FromStr for Utf8Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "lossy" => Ok(Self::Lossy),
            other => Err(Error::Config(format!("Unknown UTF-8 policy: {other}"))),
        }
    }
}

/// Tuning knobs for a line-filtering stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Longest record accepted, newline included.
    #[serde(default = "default_max_record_bytes")]
    pub max_record_bytes: usize,
    /// Bytes requested from the source per upstream read.
    #[serde(default = "default_read_capacity")]
    pub read_capacity: usize,
    #[serde(default)]
    pub invalid_utf8: Utf8Policy,
}

const fn default_max_record_bytes() -> usize {
    DEFAULT_MAX_RECORD_BYTES
}

const fn default_read_capacity() -> usize {
    DEFAULT_READ_CAPACITY
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            max_record_bytes: DEFAULT_MAX_RECORD_BYTES,
            read_capacity: DEFAULT_READ_CAPACITY,
            invalid_utf8: Utf8Policy::Reject,
        }
    }
}

impl StreamConfig {
    /// Reject values that would make a stream unable to make progress.
    pub fn validate(&self) -> Result<()> {
        if self.max_record_bytes == 0 {
            return Err(Error::Config("max_record_bytes must be positive".into()));
        }
        if self.read_capacity == 0 {
            return Err(Error::Config("read_capacity must be positive".into()));
        }
        Ok(())
    }
}

/// Load configuration with hierarchical resolution.
pub fn load_config(path: Option<&Path>) -> Result<StreamConfig> {
    let mut config = match path {
        Some(p) if p.exists() => load_config_file(p)?,
        _ => StreamConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;

    Ok(config)
}

fn load_config_file(path: &Path) -> Result<StreamConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

fn apply_env_overrides(
    config: &mut StreamConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(val) = lookup("SIO_MAX_RECORD_BYTES") {
        config.max_record_bytes = parse_size("SIO_MAX_RECORD_BYTES", &val)?;
    }
    if let Some(val) = lookup("SIO_READ_CAPACITY") {
        config.read_capacity = parse_size("SIO_READ_CAPACITY", &val)?;
    }
    if let Some(val) = lookup("SIO_INVALID_UTF8") {
        config.invalid_utf8 = val.parse()?;
    }
    Ok(())
}

fn parse_size(key: &str, val: &str) -> Result<usize> {
    val.trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {key}={val}: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn default_config_uses_64k_record_limit() {
        let config = StreamConfig::default();
        assert_eq!(config.max_record_bytes, 65_536);
        assert_eq!(config.invalid_utf8, Utf8Policy::Reject);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config, StreamConfig::default());
    }

    #[test]
    fn partial_file_keeps_field_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sio.json");
        std::fs::write(&path, r#"{"invalid_utf8":"lossy"}"#).unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.invalid_utf8, Utf8Policy::Lossy);
        assert_eq!(config.max_record_bytes, DEFAULT_MAX_RECORD_BYTES);
        assert_eq!(config.read_capacity, DEFAULT_READ_CAPACITY);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sio.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("Failed to parse")));
    }

    #[test]
    fn env_overrides_take_priority() {
        let mut config = StreamConfig {
            max_record_bytes: 10,
            ..StreamConfig::default()
        };
        let vars = env(&[
            ("SIO_MAX_RECORD_BYTES", "2048"),
            ("SIO_READ_CAPACITY", " 16 "),
            ("SIO_INVALID_UTF8", "LOSSY"),
        ]);
        apply_env_overrides(&mut config, |key| vars.get(key).cloned()).unwrap();

        assert_eq!(config.max_record_bytes, 2048);
        assert_eq!(config.read_capacity, 16);
        assert_eq!(config.invalid_utf8, Utf8Policy::Lossy);
    }

    #[test]
    fn bad_env_value_is_reported() {
        let mut config = StreamConfig::default();
        let vars = env(&[("SIO_READ_CAPACITY", "lots")]);
        let err = apply_env_overrides(&mut config, |key| vars.get(key).cloned()).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("SIO_READ_CAPACITY")));
    }

    #[test]
    fn zero_sizes_fail_validation() {
        let config = StreamConfig {
            read_capacity: 0,
            ..StreamConfig::default()
        };
        assert!(config.validate().is_err());
        let config = StreamConfig {
            max_record_bytes: 0,
            ..StreamConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
