//! # Configuration
//!
//! `TrackerConfig` is read from TOML. Every key is optional; a missing key, table, or file falls
//! back to the defaults below.
//!
//! ```toml
//! [store]
//! buffer_size = 32
//!
//! [tickets]
//! validate_on_update = true
//! default_page_size = 20
//! max_page_size = 100
//!
//! [logging]
//! filter = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub tickets: TicketConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Capacity of each store's request channel.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketConfig {
    /// Run the validation rules on full updates as well as on creation.
    #[serde(default = "default_true")]
    pub validate_on_update: bool,
    /// Page size used when a request asks for size 0.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Larger requested page sizes are clamped to this.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            validate_on_update: default_true(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl TrackerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the stores and paging cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.buffer_size == 0 {
            return Err(invalid("store.buffer_size", "must be greater than 0"));
        }
        if self.tickets.default_page_size == 0 {
            return Err(invalid("tickets.default_page_size", "must be greater than 0"));
        }
        if self.tickets.max_page_size == 0 {
            return Err(invalid("tickets.max_page_size", "must be greater than 0"));
        }
        if self.tickets.default_page_size > self.tickets.max_page_size {
            return Err(invalid(
                "tickets.default_page_size",
                format!(
                    "{} exceeds tickets.max_page_size ({})",
                    self.tickets.default_page_size, self.tickets.max_page_size
                ),
            ));
        }
        Ok(())
    }

    /// Loads the configuration at `path`, or the defaults if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.into(),
    }
}

fn default_true() -> bool {
    true
}

fn default_buffer_size() -> usize {
    32
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    100
}

fn default_filter() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = TrackerConfig::from_toml_str("").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.store.buffer_size, 32);
        assert!(config.tickets.validate_on_update);
        assert_eq!(config.tickets.default_page_size, 20);
        assert_eq!(config.tickets.max_page_size, 100);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_partial_tables_keep_other_defaults() {
        let config = TrackerConfig::from_toml_str(
            r#"
            [tickets]
            validate_on_update = false

            [logging]
            filter = "ticket_tracker=debug"
            "#,
        )
        .unwrap();
        assert!(!config.tickets.validate_on_update);
        assert_eq!(config.tickets.max_page_size, 100);
        assert_eq!(config.logging.filter, "ticket_tracker=debug");
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = TrackerConfig::from_toml_str("[store]\nbuffer_size = \"big\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    fn rejected_key(content: &str) -> &'static str {
        match TrackerConfig::from_toml_str(content) {
            Err(ConfigError::Invalid { key, .. }) => key,
            other => panic!("expected an invalid value, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_buffer_size_is_rejected() {
        assert_eq!(
            rejected_key("[store]\nbuffer_size = 0\n"),
            "store.buffer_size"
        );
    }

    #[test]
    fn test_zero_default_page_size_is_rejected() {
        assert_eq!(
            rejected_key("[tickets]\ndefault_page_size = 0\n"),
            "tickets.default_page_size"
        );
    }

    #[test]
    fn test_zero_max_page_size_is_rejected() {
        assert_eq!(
            rejected_key("[tickets]\ndefault_page_size = 1\nmax_page_size = 0\n"),
            "tickets.max_page_size"
        );
    }

    #[test]
    fn test_default_page_size_above_max_is_rejected() {
        let err = TrackerConfig::from_toml_str(
            "[tickets]\ndefault_page_size = 50\nmax_page_size = 10\n",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for tickets.default_page_size: 50 exceeds tickets.max_page_size (10)"
        );
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("ticket-tracker-config-that-does-not-exist.toml");
        let config = TrackerConfig::load(&path).unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "ticket-tracker-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[store]\nbuffer_size = 8\n").unwrap();
        let config = TrackerConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.store.buffer_size, 8);
    }
}
