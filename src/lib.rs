pub mod align;
pub mod chem;
pub mod cli;
pub mod config;
pub mod db;
pub mod report;
pub mod search;
pub mod sequence;
pub mod stats;

pub use crate::search::{search_source, SearchOptions};
pub use crate::sequence::FingerprintSequence;

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MolblastError {
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("feature extraction failed: {0}")]
    FeatureExtraction(String),

    #[error("query conversion failed: {0}")]
    QueryConversion(String),

    #[error("database integrity error in {path}: {reason}")]
    DatabaseIntegrity { path: PathBuf, reason: String },

    #[error("ordinal {ordinal} out of range (database holds {count} sequences)")]
    OutOfRange { ordinal: u64, count: u64 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("search cancelled")]
    Cancelled,
}

impl MolblastError {
    /// Attach the offending path to an I/O failure.
    pub fn storage(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        MolblastError::Storage {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn integrity(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        MolblastError::DatabaseIntegrity {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MolblastError>;
