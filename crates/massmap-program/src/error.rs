//! Pipeline error types

use massmap_params::ConfigError;
use massmap_product::ProductError;
use std::path::PathBuf;

/// Failure of the external map maker
#[derive(Debug, thiserror::Error)]
pub enum MapMakerError {
    /// The launcher could not be started
    #[error("failed to spawn {program}: {source}")]
    ToolSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The map maker ran and reported failure
    #[error("map maker failed (exit code {code:?}): {command}")]
    ToolFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Any failure of a run; each one aborts the run with no output descriptor
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A required input document is absent
    #[error("input file {path} not found")]
    MissingInputFile { path: PathBuf },

    /// Parameter document could not be read
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input product could not be read or the descriptor not written
    #[error(transparent)]
    Product(#[from] ProductError),

    /// External map maker failed
    #[error(transparent)]
    MapMaker(#[from] MapMakerError),
}

impl PipelineError {
    /// Create missing-input error
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInputFile { path: path.into() }
    }
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
