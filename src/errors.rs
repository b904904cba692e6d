//! Typed error definitions for sort_fat_folder.
//! Every filesystem failure names the exact path(s) involved so the report
//! never leaves the location of the user's content ambiguous.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReorgError {
    #[error("Not a folder (directory): {0}")]
    InvalidTarget(PathBuf),

    #[error("Can't get parent folder for: {0}")]
    NoParent(PathBuf),

    #[error("Can't create folder: {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Can't delete folder: {path}: {source}")]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Can't rename {from} as {to}: {source}")]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Can't rename temporary folder {from} as {to}: {source}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Operation cancelled by user")]
    Cancelled,
}

impl ReorgError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u8 {
        match self {
            ReorgError::InvalidTarget(_) => 10,
            ReorgError::NoParent(_) => 11,
            ReorgError::CreateFailed { .. } => 20,
            ReorgError::DeleteFailed { .. } => 21,
            ReorgError::MoveFailed { .. } => 22,
            ReorgError::RenameFailed { .. } => 23,
            ReorgError::Cancelled => 30,
        }
    }

    /// Stable snake_case label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ReorgError::InvalidTarget(_) => "invalid_target",
            ReorgError::NoParent(_) => "no_parent",
            ReorgError::CreateFailed { .. } => "create_failed",
            ReorgError::DeleteFailed { .. } => "delete_failed",
            ReorgError::MoveFailed { .. } => "move_failed",
            ReorgError::RenameFailed { .. } => "rename_failed",
            ReorgError::Cancelled => "cancelled",
        }
    }

    /// A cancellation is a clean early stop, not a failure.
    #[inline]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ReorgError::Cancelled)
    }
}
