//! Configuration module for sieve-rs
//!
//! The only knob the binary exposes is the number of primes, fixed at
//! [`DEFAULT_PRIME_COUNT`]. Library users can build a [`SieveConfig`] in code
//! or load one from TOML:
//!
//! ```toml
//! count = 100
//! shutdown = "join"
//! stage_stack_size = 65536
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sieve_rs::config::{SieveConfig, ShutdownPolicy};
//!
//! let config = SieveConfig::from_toml_str("count = 25\nshutdown = \"join\"")?;
//! assert_eq!(config.count, 25);
//! assert_eq!(config.shutdown, ShutdownPolicy::Join);
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{Result, SieveError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of primes reported by default
pub const DEFAULT_PRIME_COUNT: usize = 10;

/// Smallest stack a stage thread may be given
pub const MIN_STAGE_STACK_SIZE: usize = 16 * 1024;

/// Sieve configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SieveConfig {
    /// Number of primes to report (`N`)
    #[serde(default = "default_count")]
    pub count: usize,

    /// What happens to the stages after the last prime
    #[serde(default)]
    pub shutdown: ShutdownPolicy,

    /// Stack size for stage threads. `None` keeps the platform default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_stack_size: Option<usize>,
}

fn default_count() -> usize {
    DEFAULT_PRIME_COUNT
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_PRIME_COUNT,
            shutdown: ShutdownPolicy::default(),
            stage_stack_size: None,
        }
    }
}

impl SieveConfig {
    /// Default configuration reporting `count` primes
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    pub fn shutdown(mut self, policy: ShutdownPolicy) -> Self {
        self.shutdown = policy;
        self
    }

    pub fn stage_stack_size(mut self, size: usize) -> Self {
        self.stage_stack_size = Some(size);
        self
    }

    /// Check values serde cannot reject on its own
    pub fn validate(&self) -> Result<()> {
        if let Some(size) = self.stage_stack_size {
            if size < MIN_STAGE_STACK_SIZE {
                return Err(SieveError::Config(format!(
                    "stage_stack_size {} is below the minimum of {} bytes",
                    size, MIN_STAGE_STACK_SIZE
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| SieveError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SieveError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_toml_str(&content).map_err(|e| e.with_context(format!("{:?}", path)))
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SieveError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Write the config to `path` as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| {
            SieveError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SieveConfig::default();
        assert_eq!(config.count, 10);
        assert_eq!(config.shutdown, ShutdownPolicy::Abandon);
        assert!(config.stage_stack_size.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SieveConfig::from_toml_str("").unwrap();
        assert_eq!(config, SieveConfig::default());
    }

    #[test]
    fn test_parse_full_document() {
        let config = SieveConfig::from_toml_str(
            "count = 250\nshutdown = \"join\"\nstage_stack_size = 131072\n",
        )
        .unwrap();
        assert_eq!(config.count, 250);
        assert_eq!(config.shutdown, ShutdownPolicy::Join);
        assert_eq!(config.stage_stack_size, Some(128 * 1024));
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let err = SieveConfig::from_toml_str("shutdown = \"cancel\"").unwrap_err();
        assert!(matches!(err, SieveError::Config(_)));
    }

    #[test]
    fn test_rejects_tiny_stack() {
        let err = SieveConfig::with_count(5)
            .stage_stack_size(1024)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("stage_stack_size"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SieveConfig::with_count(42)
            .shutdown(ShutdownPolicy::Join)
            .stage_stack_size(64 * 1024);
        let text = config.to_toml_string().unwrap();
        assert_eq!(SieveConfig::from_toml_str(&text).unwrap(), config);
    }
}
