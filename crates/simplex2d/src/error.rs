//! # Noise Error Types
//!
//! All errors that can occur while building a noise generator.
//!
//! Sampling itself never fails: once a generator exists, every query is a
//! total function of its coordinates.

use thiserror::Error;

/// Errors that can occur in the noise system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoiseError {
    /// A configuration value is outside its contract.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A TOML configuration document could not be decoded.
    #[error("failed to parse noise configuration: {0}")]
    ConfigParse(String),

    /// A configuration could not be encoded as TOML.
    #[error("failed to serialize noise configuration: {0}")]
    ConfigSerialize(String),

    /// A configuration file could not be read.
    #[error("failed to read noise configuration {path}: {message}")]
    ConfigIo {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },

    /// A grid output buffer does not match the requested dimensions.
    #[error("grid buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSize {
        /// `width * height`.
        expected: usize,
        /// Length of the buffer passed in.
        actual: usize,
    },
}

impl NoiseError {
    /// Shorthand for an [`NoiseError::InvalidConfiguration`].
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for noise operations.
pub type NoiseResult<T> = Result<T, NoiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = NoiseError::invalid("octaves", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: octaves must be at least 1"
        );
    }

    #[test]
    fn test_buffer_size_display() {
        let err = NoiseError::BufferSize {
            expected: 16,
            actual: 15,
        };
        assert!(err.to_string().contains("expected 16"));
    }
}
