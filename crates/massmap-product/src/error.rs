//! Error types for product documents

use std::path::PathBuf;

/// Errors raised while reading or writing product documents
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    /// Input product could not be read
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Product document does not match its schema
    #[error("malformed product document {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: quick_xml::DeError,
    },

    /// Artifact reference has no file-name component
    #[error("artifact path has no file name: {0}")]
    InvalidArtifactPath(PathBuf),

    /// Rendering the document failed
    #[error("serialization failed: {0}")]
    Serialization(#[from] quick_xml::SeError),

    /// Output descriptor could not be created or written
    #[error("cannot write output descriptor {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProductError {
    /// Create read error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create malformed-document error
    pub fn malformed(origin: impl Into<String>, source: quick_xml::DeError) -> Self {
        Self::Malformed {
            origin: origin.into(),
            source,
        }
    }

    /// Create output-write error for path
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for product operations
pub type ProductResult<T> = Result<T, ProductError>;
