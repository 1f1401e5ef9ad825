//! Read side: validated, memory-mapped random access to a built database.

use std::fs::File;
use std::io;

use memmap2::Mmap;

use crate::db::format::{self, IndexEntry, IndexHeader};
use crate::db::DbPaths;
use crate::sequence::FingerprintSequence;
use crate::{MolblastError, Result};

/// An open database: the fully validated index table plus a read-only map of
/// the format store.
///
/// `get` takes `&self`, so any number of worker threads may fetch records
/// through one shared handle; the mapping is never written through.
#[derive(Debug)]
pub struct Database {
    paths: DbPaths,
    header: IndexHeader,
    entries: Vec<IndexEntry>,
    store: Option<Mmap>,
}

impl Database {
    /// Open an artifact pair, validating both headers and the whole entry
    /// table before returning. Corruption is reported as
    /// [`MolblastError::DatabaseIntegrity`] naming the offending file.
    pub fn open(paths: &DbPaths) -> Result<Self> {
        let index_bytes =
            std::fs::read(&paths.index).map_err(|e| MolblastError::storage(&paths.index, e))?;
        let header = IndexHeader::read_from(&paths.index, &index_bytes)?;

        let table = &index_bytes[format::INDEX_HEADER_LEN..];
        // The count is untrusted until it reproduces the table length exactly.
        let expected = header.count.checked_mul(format::INDEX_ENTRY_LEN as u64);
        if expected != Some(table.len() as u64) {
            return Err(MolblastError::integrity(
                &paths.index,
                format!(
                    "entry table is {} bytes, header claims {} records",
                    table.len(),
                    header.count
                ),
            ));
        }

        let file = File::open(&paths.format).map_err(|e| MolblastError::storage(&paths.format, e))?;
        // Safety: artifacts are published by rename and never mutated in
        // place; a rebuild replaces the files rather than rewriting them.
        let store =
            unsafe { Mmap::map(&file) }.map_err(|e| MolblastError::storage(&paths.format, e))?;
        format::check_format_header(&paths.format, &store)?;

        let mut entries = Vec::with_capacity(header.count as usize);
        let mut end = format::FORMAT_HEADER_LEN as u64;
        for ordinal in 0..header.count as usize {
            let entry = IndexEntry::read_at(table, ordinal);
            if entry.offset != end {
                return Err(MolblastError::integrity(
                    &paths.index,
                    format!(
                        "record {ordinal} starts at {}, previous record ends at {end}",
                        entry.offset
                    ),
                ));
            }
            end += entry.length as u64;
            entries.push(entry);
        }
        if end != store.len() as u64 {
            return Err(MolblastError::integrity(
                &paths.format,
                format!("records end at {end}, store is {} bytes", store.len()),
            ));
        }

        Ok(Self {
            paths: paths.clone(),
            header,
            entries,
            store: Some(store),
        })
    }

    pub fn count(&self) -> u64 {
        self.header.count
    }

    /// Sum of all stored sequence lengths, the database term of the
    /// expectation formula.
    pub fn total_symbols(&self) -> u64 {
        self.header.total_symbols
    }

    pub fn paths(&self) -> &DbPaths {
        &self.paths
    }

    /// Decode the record at `ordinal`. Repeated calls for the same ordinal
    /// return equal sequences for the lifetime of the handle.
    pub fn get(&self, ordinal: u64) -> Result<FingerprintSequence> {
        let store = self.store.as_ref().ok_or_else(|| {
            MolblastError::storage(&self.paths.format, io::Error::other("database handle is closed"))
        })?;
        let entry = self
            .entries
            .get(ordinal as usize)
            .ok_or(MolblastError::OutOfRange {
                ordinal,
                count: self.header.count,
            })?;
        let start = entry.offset as usize;
        let bytes = &store[start..start + entry.length as usize];
        format::decode_record(&self.paths.format, bytes)
    }

    /// Drop the mapping. Calling twice is fine; `get` afterwards reports a
    /// storage error instead of touching unmapped memory.
    pub fn close(&mut self) {
        self.store = None;
    }
}
