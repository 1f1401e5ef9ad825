#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use molblast::chem::{Atom, FingerprintExtractor, Molecule, StructureParser};
use molblast::sequence::{pack_symbol, Symbol};
use molblast::{MolblastError, Result};

/// Parser double: every alphanumeric character becomes one atom, so test
/// records can spell their symbol sequences out literally.
pub struct LiteralParser;

impl StructureParser for LiteralParser {
    fn parse(&self, text: &str) -> Result<Molecule> {
        let mut atoms = Vec::new();
        for c in text.chars() {
            if !c.is_ascii_alphanumeric() {
                return Err(MolblastError::Parse(format!(
                    "unsupported literal character {c:?}"
                )));
            }
            atoms.push(Atom {
                atomic_number: c as u8,
                formal_charge: 0,
                aromatic: false,
                implicit_hydrogens: 0,
            });
        }
        Ok(Molecule::new(atoms, Vec::new()))
    }
}

/// Extractor double: one symbol per atom, in input order, so literal
/// records align position by position.
pub struct LiteralExtractor;

impl FingerprintExtractor for LiteralExtractor {
    fn extract(&self, mol: &Molecule) -> Result<Vec<Symbol>> {
        Ok(mol
            .atoms()
            .iter()
            .map(|atom| pack_symbol(atom.atomic_number, 0))
            .collect())
    }
}

/// Write a tab-separated source file under `dir` and return its path.
pub fn write_source(dir: &Path, name: &str, records: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    let mut contents = String::new();
    for (id, structure) in records {
        contents.push_str(id);
        contents.push('\t');
        contents.push_str(structure);
        contents.push('\n');
    }
    fs::write(&path, contents).unwrap();
    path
}
