//! Chemical structure handling: parsing structure notations into molecular
//! graphs and reducing graphs to fingerprint sequences.
//!
//! Both steps sit behind traits so the database builder and the search
//! pipeline take the notation and the fingerprint scheme as explicit
//! arguments instead of baking one in.

pub mod features;
pub mod molecule;
pub mod smiles;

pub use features::EnvironmentExtractor;
pub use molecule::{Atom, Bond, BondOrder, Molecule};

use crate::sequence::{FingerprintSequence, Symbol};
use crate::Result;

/// Turns a structure notation string into a molecular graph.
pub trait StructureParser {
    fn parse(&self, text: &str) -> Result<Molecule>;
}

/// Reduces a molecular graph to an ordered fingerprint symbol sequence.
pub trait FingerprintExtractor {
    fn extract(&self, mol: &Molecule) -> Result<Vec<Symbol>>;
}

/// The SMILES line notation, covering the organic subset plus bracket atoms.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmilesNotation;

impl StructureParser for SmilesNotation {
    fn parse(&self, text: &str) -> Result<Molecule> {
        smiles::parse(text)
    }
}

/// Parse one structure and extract its fingerprint in a single step.
pub fn encode_structure<P, X>(
    id: &str,
    description: &str,
    text: &str,
    parser: &P,
    extractor: &X,
) -> Result<FingerprintSequence>
where
    P: StructureParser + ?Sized,
    X: FingerprintExtractor + ?Sized,
{
    let mol = parser.parse(text)?;
    let symbols = extractor.extract(&mol)?;
    Ok(FingerprintSequence::new(id, description, symbols))
}
