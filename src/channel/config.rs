//! Channel configuration
//!
//! Flat TOML file; every key has a default so an empty file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Largest value the 14-digit length field can carry.
pub const MAX_LENGTH_FIELD: u64 = 99_999_999_999_999;

/// Legacy peers reject commands of one million bytes or more.
pub const DEFAULT_MAX_PAYLOAD_BYTES: u64 = 999_999;

/// Stream channel settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelConfig {
    /// Largest payload, in bytes, accepted in either direction
    pub max_payload_bytes: u64,

    /// Flush the underlying writer after every frame
    pub flush_each_frame: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            flush_each_frame: true,
        }
    }
}

/// Errors that can occur when loading channel configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read channel config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Channel config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ChannelConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ChannelConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_payload_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "max_payload_bytes".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_payload_bytes > MAX_LENGTH_FIELD {
            return Err(ConfigError::Invalid {
                field: "max_payload_bytes".to_string(),
                reason: format!("must fit the 14-digit length field (<= {})", MAX_LENGTH_FIELD),
            });
        }
        Ok(())
    }
}
