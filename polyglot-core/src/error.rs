use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("the store already holds the maximum of {limit} entries")]
    EntryCapacityExceeded { limit: usize },

    #[error("entry {entry} already holds the maximum of {limit} language-translation pairs")]
    PairCapacityExceeded { entry: usize, limit: usize },

    #[error("entry {index} does not exist (the store holds {count})")]
    EntryOutOfRange { index: usize, count: usize },

    #[error("pair {pair} does not exist in entry {entry}")]
    PairOutOfRange { entry: usize, pair: usize },

    #[error("the source pair of entry {entry} cannot be deleted on its own")]
    SourcePairProtected { entry: usize },

    #[error("an entry needs at least one target pair besides its source")]
    MissingTarget,

    #[error("{field} must be between 1 and {max} characters")]
    InvalidField { field: &'static str, max: usize },

    #[error("invalid filename '{name}': {reason}")]
    InvalidFilename { name: String, reason: &'static str },

    #[error("file {path} does not exist or cannot be accessed")]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CoreError {
    /// Stable identifier sent to protocol clients alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::EntryCapacityExceeded { .. } => "entry_capacity_exceeded",
            CoreError::PairCapacityExceeded { .. } => "pair_capacity_exceeded",
            CoreError::EntryOutOfRange { .. } => "entry_out_of_range",
            CoreError::PairOutOfRange { .. } => "pair_out_of_range",
            CoreError::SourcePairProtected { .. } => "source_pair_protected",
            CoreError::MissingTarget => "missing_target",
            CoreError::InvalidField { .. } => "invalid_field",
            CoreError::InvalidFilename { .. } => "invalid_filename",
            CoreError::FileUnavailable { .. } => "file_unavailable",
            CoreError::WriteFile { .. } => "write_failed",
        }
    }

    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            CoreError::EntryCapacityExceeded { .. } | CoreError::PairCapacityExceeded { .. }
        )
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
