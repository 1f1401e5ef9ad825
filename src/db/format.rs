//! On-disk layout shared by the database builder and reader.
//!
//! A database is an artifact pair with a common base name:
//!
//! ```text
//! <base>.index    "MBIX" | version u32 | count u64 | total_symbols u64
//!                 then count entries of offset u64 | length u32
//! <base>.format   "MBFS" | version u32
//!                 then count concatenated bincode-encoded records
//! ```
//!
//! All integers are little-endian. Entry offsets are absolute positions in
//! the format store, stored in ordinal order; the builder writes records
//! back to back, so entry `i + 1` starts exactly where entry `i` ends.

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use std::io::{self, Write};
use std::path::Path;

use crate::sequence::FingerprintSequence;
use crate::{MolblastError, Result};

pub const INDEX_MAGIC: &[u8; 4] = b"MBIX";
pub const FORMAT_MAGIC: &[u8; 4] = b"MBFS";
pub const LAYOUT_VERSION: u32 = 1;

pub const INDEX_HEADER_LEN: usize = 24;
pub const INDEX_ENTRY_LEN: usize = 12;
pub const FORMAT_HEADER_LEN: usize = 8;

/// Fixed header of the index file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    /// Number of records in the pair.
    pub count: u64,
    /// Sum of all stored sequence lengths.
    pub total_symbols: u64,
}

impl IndexHeader {
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(INDEX_MAGIC)?;
        w.write_u32::<LittleEndian>(LAYOUT_VERSION)?;
        w.write_u64::<LittleEndian>(self.count)?;
        w.write_u64::<LittleEndian>(self.total_symbols)
    }

    pub fn read_from(path: &Path, bytes: &[u8]) -> Result<Self> {
        if bytes.len() < INDEX_HEADER_LEN {
            return Err(MolblastError::integrity(
                path,
                format!(
                    "file is {} bytes, the header alone needs {INDEX_HEADER_LEN}",
                    bytes.len()
                ),
            ));
        }
        if &bytes[..4] != INDEX_MAGIC {
            return Err(MolblastError::integrity(path, "not an index file (bad magic)"));
        }
        let version = LittleEndian::read_u32(&bytes[4..8]);
        if version != LAYOUT_VERSION {
            return Err(MolblastError::integrity(
                path,
                format!("layout version {version}, this build reads {LAYOUT_VERSION}"),
            ));
        }
        Ok(Self {
            count: LittleEndian::read_u64(&bytes[8..16]),
            total_symbols: LittleEndian::read_u64(&bytes[16..24]),
        })
    }
}

/// One fixed-width index entry addressing a record in the format store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub offset: u64,
    pub length: u32,
}

impl IndexEntry {
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_u64::<LittleEndian>(self.offset)?;
        w.write_u32::<LittleEndian>(self.length)
    }

    /// Decode the entry at `ordinal` from the index entry table. The caller
    /// has already validated that the table holds `count` entries.
    pub fn read_at(table: &[u8], ordinal: usize) -> Self {
        let base = ordinal * INDEX_ENTRY_LEN;
        Self {
            offset: LittleEndian::read_u64(&table[base..base + 8]),
            length: LittleEndian::read_u32(&table[base + 8..base + 12]),
        }
    }
}

pub fn write_format_header<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(FORMAT_MAGIC)?;
    w.write_u32::<LittleEndian>(LAYOUT_VERSION)
}

pub fn check_format_header(path: &Path, bytes: &[u8]) -> Result<()> {
    if bytes.len() < FORMAT_HEADER_LEN {
        return Err(MolblastError::integrity(
            path,
            format!(
                "file is {} bytes, the header alone needs {FORMAT_HEADER_LEN}",
                bytes.len()
            ),
        ));
    }
    if &bytes[..4] != FORMAT_MAGIC {
        return Err(MolblastError::integrity(
            path,
            "not a format store (bad magic)",
        ));
    }
    let version = LittleEndian::read_u32(&bytes[4..8]);
    if version != LAYOUT_VERSION {
        return Err(MolblastError::integrity(
            path,
            format!("layout version {version}, this build reads {LAYOUT_VERSION}"),
        ));
    }
    Ok(())
}

pub fn encode_record(seq: &FingerprintSequence) -> std::result::Result<Vec<u8>, bincode::Error> {
    bincode::serialize(seq)
}

pub fn decode_record(path: &Path, bytes: &[u8]) -> Result<FingerprintSequence> {
    bincode::deserialize(bytes)
        .map_err(|e| MolblastError::integrity(path, format!("record decode failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn index_header_round_trips() {
        let header = IndexHeader {
            count: 42,
            total_symbols: 1234,
        };
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), INDEX_HEADER_LEN);
        let back = IndexHeader::read_from(&PathBuf::from("x.index"), &buf).unwrap();
        assert_eq!(back, header);
    }

    #[test]
    fn entry_round_trips() {
        let entry = IndexEntry {
            offset: 8,
            length: 96,
        };
        let mut buf = Vec::new();
        entry.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), INDEX_ENTRY_LEN);
        assert_eq!(IndexEntry::read_at(&buf, 0), entry);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut buf = Vec::new();
        IndexHeader {
            count: 0,
            total_symbols: 0,
        }
        .write_to(&mut buf)
        .unwrap();
        buf[0] = b'X';
        let err = IndexHeader::read_from(&PathBuf::from("x.index"), &buf).unwrap_err();
        assert!(err.to_string().contains("magic"));
    }

    #[test]
    fn future_version_is_rejected() {
        let mut buf = Vec::new();
        write_format_header(&mut buf).unwrap();
        buf[4] = 9;
        let err = check_format_header(&PathBuf::from("x.format"), &buf).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn record_codec_round_trips() {
        let seq = FingerprintSequence::new("mol-1", "CCO", vec![0x0601, 0x0602, 0x0801]);
        let bytes = encode_record(&seq).unwrap();
        let back = decode_record(&PathBuf::from("x.format"), &bytes).unwrap();
        assert_eq!(back, seq);
    }
}
