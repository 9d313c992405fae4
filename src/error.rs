use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    Validation { field: String, message: String },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open { path: PathBuf, source: std::io::Error },

    #[error("bad record in {path}: {source}")]
    Record { path: PathBuf, source: csv::Error },
}

/// Rejections raised before the engine runs. Messages are shown to the operator as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortError {
    #[error("Select a positive multiple of {group_size} players (got {count})")]
    InvalidSelectionCount { count: usize, group_size: usize },

    #[error("Player {0} is selected more than once")]
    DuplicatePlayer(String),

    #[error("Slot {0} is listed more than once")]
    DuplicateSlot(String),

    #[error("No sorting result is available yet")]
    NoResult,

    #[error("Slot {0} has no completed group")]
    UnknownGroupSlot(String),

    #[error("Slot {0} is mapped to more than one league")]
    GroupMappedTwice(String),

    #[error("League name for slot {0} is empty")]
    EmptyLeagueName(String),

    #[error("League name {0} is used more than once")]
    DuplicateLeagueName(String),

    #[error("Slot {0} has a completed group but no league")]
    UnmappedGroup(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}
