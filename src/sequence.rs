//! The fingerprint sequence model: a molecule reduced to an ordered run of
//! fingerprint symbols, the unit every alignment operates on.

use serde::{Deserialize, Serialize};

/// One fingerprint token. The high byte carries the element class assigned by
/// the extractor, the low byte its structural environment class. The core
/// treats the value as opaque except for the class split used by scoring.
pub type Symbol = u16;

/// Element-class half of a symbol.
#[inline]
pub fn element_class(symbol: Symbol) -> u8 {
    (symbol >> 8) as u8
}

/// Environment-class half of a symbol.
#[inline]
pub fn environment_class(symbol: Symbol) -> u8 {
    (symbol & 0xff) as u8
}

/// Pack an (element class, environment class) pair into a symbol.
#[inline]
pub fn pack_symbol(element: u8, environment: u8) -> Symbol {
    ((element as u16) << 8) | environment as u16
}

/// An identified, immutable fingerprint sequence.
///
/// Constructed once by the feature-extraction collaborator (or directly in
/// tests) and read-only afterwards; database entries and query sequences are
/// both represented this way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintSequence {
    id: String,
    description: String,
    symbols: Vec<Symbol>,
}

impl FingerprintSequence {
    pub fn new(id: impl Into<String>, description: impl Into<String>, symbols: Vec<Symbol>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            symbols,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Empty sequences are legal; they simply never clear the alignment
    /// minimum-score threshold.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
