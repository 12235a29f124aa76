//! Application error type.

use thiserror::Error;
use transit_core::TransitError;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// The model rejected the input network.
    #[error(transparent)]
    Transit(#[from] TransitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid request document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    /// A path or size check on an input/output file failed.
    #[error("{0}")]
    InvalidFile(String),
}
