//! Database construction from a tab-separated structure source.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::chem::{encode_structure, FingerprintExtractor, StructureParser};
use crate::db::format::{self, IndexEntry, IndexHeader};
use crate::db::DbPaths;
use crate::{MolblastError, Result};

/// Outcome counters for one build run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    /// Records written to the artifact pair.
    pub stored: u64,
    /// Source lines dropped: missing tab separator or failed structure parse.
    pub skipped: u64,
    /// Sum of the stored sequences' lengths.
    pub total_symbols: u64,
}

/// Build the artifact pair for `source`.
///
/// Each source line holds `id <TAB> structure`. A line that cannot be split
/// or whose structure fails to parse is logged and counted, never fatal.
/// `limit` stops the scan after that many records have been stored.
///
/// Both artifacts are staged under temporary names and renamed into place
/// only after the whole source has been processed, so a reader never opens a
/// half-written pair and an interrupted build leaves the previous artifacts
/// untouched.
pub fn build<P, X>(
    source: &Path,
    paths: &DbPaths,
    parser: &P,
    extractor: &X,
    limit: Option<usize>,
) -> Result<BuildSummary>
where
    P: StructureParser + ?Sized,
    X: FingerprintExtractor + ?Sized,
{
    let reader =
        BufReader::new(File::open(source).map_err(|e| MolblastError::storage(source, e))?);

    let tmp_format = paths.format.with_extension("format.tmp");
    let tmp_index = paths.index.with_extension("index.tmp");

    let mut store = BufWriter::new(
        File::create(&tmp_format).map_err(|e| MolblastError::storage(&tmp_format, e))?,
    );
    format::write_format_header(&mut store).map_err(|e| MolblastError::storage(&tmp_format, e))?;

    let mut entries: Vec<IndexEntry> = Vec::new();
    let mut offset = format::FORMAT_HEADER_LEN as u64;
    let mut summary = BuildSummary {
        stored: 0,
        skipped: 0,
        total_symbols: 0,
    };

    for (line_no, line) in reader.lines().enumerate() {
        if limit.is_some_and(|n| summary.stored as usize >= n) {
            debug!(limit = limit.unwrap_or(0), "record limit reached");
            break;
        }
        let line = line.map_err(|e| MolblastError::storage(source, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let Some((id, structure)) = split_record(&line) else {
            warn!(line = line_no + 1, "skipping line without a tab separator");
            summary.skipped += 1;
            continue;
        };
        let seq = match encode_structure(id, structure, structure, parser, extractor) {
            Ok(seq) => seq,
            Err(e) => {
                warn!(line = line_no + 1, id, error = %e, "skipping unparseable structure");
                summary.skipped += 1;
                continue;
            }
        };
        let payload = format::encode_record(&seq).map_err(|e| {
            MolblastError::integrity(&tmp_format, format!("record encode failed: {e}"))
        })?;
        store
            .write_all(&payload)
            .map_err(|e| MolblastError::storage(&tmp_format, e))?;
        entries.push(IndexEntry {
            offset,
            length: payload.len() as u32,
        });
        offset += payload.len() as u64;
        summary.total_symbols += seq.len() as u64;
        summary.stored += 1;
    }

    store
        .flush()
        .map_err(|e| MolblastError::storage(&tmp_format, e))?;
    drop(store);

    let mut index = BufWriter::new(
        File::create(&tmp_index).map_err(|e| MolblastError::storage(&tmp_index, e))?,
    );
    IndexHeader {
        count: summary.stored,
        total_symbols: summary.total_symbols,
    }
    .write_to(&mut index)
    .map_err(|e| MolblastError::storage(&tmp_index, e))?;
    for entry in &entries {
        entry
            .write_to(&mut index)
            .map_err(|e| MolblastError::storage(&tmp_index, e))?;
    }
    index
        .flush()
        .map_err(|e| MolblastError::storage(&tmp_index, e))?;
    drop(index);

    fs::rename(&tmp_format, &paths.format)
        .map_err(|e| MolblastError::storage(&paths.format, e))?;
    fs::rename(&tmp_index, &paths.index).map_err(|e| MolblastError::storage(&paths.index, e))?;

    info!(
        stored = summary.stored,
        skipped = summary.skipped,
        total_symbols = summary.total_symbols,
        index = %paths.index.display(),
        "database build complete"
    );
    Ok(summary)
}

/// Split one source line into its id and structure fields.
fn split_record(line: &str) -> Option<(&str, &str)> {
    let (id, structure) = line.split_once('\t')?;
    let id = id.trim();
    let structure = structure.trim();
    if id.is_empty() || structure.is_empty() {
        return None;
    }
    Some((id, structure))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_lines_split_on_the_first_tab() {
        assert_eq!(split_record("mol-1\tCCO"), Some(("mol-1", "CCO")));
        assert_eq!(split_record("  mol-2 \t c1ccccc1 "), Some(("mol-2", "c1ccccc1")));
    }

    #[test]
    fn lines_without_both_fields_are_rejected() {
        assert_eq!(split_record("mol-1"), None);
        assert_eq!(split_record("mol-1\t"), None);
        assert_eq!(split_record("\tCCO"), None);
    }
}
