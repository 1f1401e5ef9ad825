//! One-shot freshness classification of an artifact pair.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use tracing::debug;

use crate::db::DbPaths;

/// How a structure source relates to its built artifacts. Computed once per
/// dispatch; callers branch on the value instead of re-probing the
/// filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseStatus {
    /// Both artifacts exist and are at least as new as the source.
    Fresh,
    /// At least one artifact does not exist.
    Missing,
    /// The source was modified after the artifacts were built, or a
    /// timestamp could not be read.
    Stale,
}

impl DatabaseStatus {
    pub fn check(source: &Path, paths: &DbPaths) -> Self {
        if !paths.index.exists() || !paths.format.exists() {
            return DatabaseStatus::Missing;
        }
        let source_time = match modified(source) {
            Some(t) => t,
            None => return DatabaseStatus::Stale,
        };
        match (modified(&paths.index), modified(&paths.format)) {
            (Some(index_time), Some(format_time))
                if index_time >= source_time && format_time >= source_time =>
            {
                DatabaseStatus::Fresh
            }
            _ => {
                debug!(source = %source.display(), "artifacts predate the source");
                DatabaseStatus::Stale
            }
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}
