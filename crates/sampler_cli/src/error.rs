//! CLI error types.

use sampler_engine::SamplingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `sampler` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// The engine rejected a request.
    #[error("Sampling error: {0}")]
    Sampling(#[from] SamplingError),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be encoded, or a batch file could not be decoded.
    #[error("Serialisation error: {0}")]
    Serialisation(String),

    /// A command-line argument or batch entry is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialisation(err.to_string())
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        Self::Serialisation(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialisation(err.to_string())
    }
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_error_conversion() {
        let err: CliError = SamplingError::InvalidParameter {
            name: "theta",
            reason: "must lie in [0, 1], got 2".to_string(),
        }
        .into();
        assert!(matches!(err, CliError::Sampling(_)));
        assert!(err.to_string().contains("theta"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let err: CliError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(matches!(err, CliError::Serialisation(_)));
    }

    #[test]
    fn test_io_error_display() {
        let err: CliError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.to_string(), "IO error: missing");
    }
}
