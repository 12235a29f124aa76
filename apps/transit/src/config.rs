//! # Configuration
//!
//! Optional TOML file passed with `--config`.
//!
//! ```toml
//! [routing]
//! bus_wait_time = 6
//! bus_velocity = 40.0
//!
//! [output]
//! pretty = true
//!
//! [limits]
//! max_input_bytes = 67108864
//! ```
//!
//! Every section is optional; missing keys take their `Default` values.

use crate::CliError;
use serde::Deserialize;
use std::path::Path;
use transit_core::RoutingSettings;

/// Default cap on the size of an input document (64 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 64 * 1024 * 1024;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Routing settings used when the document has none.
    pub routing: Option<RoutingSettings>,
    pub output: OutputConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Pretty-print the response document.
    pub pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    pub max_input_bytes: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl AppConfig {
    /// Parse a TOML string. Routing settings, when present, are validated.
    pub fn from_toml_str(text: &str) -> Result<Self, CliError> {
        let config: Self = toml::from_str(text)?;
        if let Some(settings) = &config.routing {
            settings.validate()?;
        }
        Ok(config)
    }

    /// Load a TOML file from disk.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::InvalidFile(format!(
                "Cannot read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }
}
