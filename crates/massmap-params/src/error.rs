//! Error types for parameter ingestion
//!
//! Covers:
//! - Reading the parameter document from disk
//! - Documents whose structure does not match the expected shape
//! - Values that parse but violate a parameter invariant
//! - Writing a parameter set back out

use std::path::PathBuf;

/// Errors raised while reading or writing a parameter document
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error while reading or writing the document
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document structure does not match the parameter schema
    #[error("malformed configuration in {origin}: {source}")]
    MalformedConfig {
        origin: String,
        #[source]
        source: quick_xml::DeError,
    },

    /// A value parsed but is out of range for its parameter
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    /// Rendering the parameter document failed
    #[error("serialization failed: {0}")]
    Serialization(#[from] quick_xml::SeError),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create malformed-document error for the given origin
    pub fn malformed(origin: impl Into<String>, source: quick_xml::DeError) -> Self {
        Self::MalformedConfig {
            origin: origin.into(),
            source,
        }
    }

    /// Create invalid-value error
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }

    /// Check if the document itself was unreadable as a parameter document
    #[inline]
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedConfig { .. } | Self::InvalidValue { .. })
    }
}

/// Result type alias for parameter operations
pub type ConfigResult<T> = Result<T, ConfigError>;
