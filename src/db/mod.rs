//! The fingerprint sequence database: a flat record store with a sidecar
//! index, derived from and kept alongside its structure source.

pub mod builder;
pub mod format;
pub mod reader;
pub mod status;

pub use builder::{build, BuildSummary};
pub use reader::Database;
pub use status::DatabaseStatus;

use std::path::{Path, PathBuf};

/// Locations of the two database artifacts paired with a source file.
///
/// `structures.tsv` maps to `structures.index` and `structures.format` in
/// the same directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbPaths {
    pub index: PathBuf,
    pub format: PathBuf,
}

impl DbPaths {
    pub fn derive(source: &Path) -> Self {
        Self {
            index: source.with_extension("index"),
            format: source.with_extension("format"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_paths_share_the_source_stem() {
        let paths = DbPaths::derive(Path::new("/data/chembl.tsv"));
        assert_eq!(paths.index, PathBuf::from("/data/chembl.index"));
        assert_eq!(paths.format, PathBuf::from("/data/chembl.format"));
    }

    #[test]
    fn extensionless_sources_gain_the_artifact_extensions() {
        let paths = DbPaths::derive(Path::new("structures"));
        assert_eq!(paths.index, PathBuf::from("structures.index"));
        assert_eq!(paths.format, PathBuf::from("structures.format"));
    }
}
