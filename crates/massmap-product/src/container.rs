//! Data containers
//!
//! A product never embeds its data; it points at a file through a
//! `DataContainer` carrying the file name and a status flag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Lifecycle status of a referenced data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileStatus {
    /// Produced locally, not yet ingested
    #[default]
    Proposed,
    Processing,
    /// Ingested by the archive
    Committed,
    Validated,
    Archived,
    Deleted,
}

impl FileStatus {
    /// Document spelling of the status
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Proposed => "PROPOSED",
            Self::Processing => "PROCESSING",
            Self::Committed => "COMMITTED",
            Self::Validated => "VALIDATED",
            Self::Archived => "ARCHIVED",
            Self::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "PROPOSED" => Ok(Self::Proposed),
            "PROCESSING" => Ok(Self::Processing),
            "COMMITTED" => Ok(Self::Committed),
            "VALIDATED" => Ok(Self::Validated),
            "ARCHIVED" => Ok(Self::Archived),
            "DELETED" => Ok(Self::Deleted),
            other => Err(format!("unknown file status '{other}'")),
        }
    }
}

/// Reference to a data file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataContainer {
    #[serde(rename = "@filestatus")]
    pub file_status: FileStatus,
    #[serde(rename = "FileName")]
    pub file_name: String,
}

impl DataContainer {
    /// Proposed container for `file_name`
    pub fn proposed(file_name: impl Into<String>) -> Self {
        Self {
            file_status: FileStatus::Proposed,
            file_name: file_name.into(),
        }
    }

    /// Referenced file name
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> &Path {
        Path::new(&self.file_name)
    }
}
