//! Fingerprint extraction: reduce a molecular graph to the ordered symbol
//! sequence the aligner consumes.
//!
//! Each atom contributes one symbol combining its element with a hashed
//! structural environment class. Environments are iterated connectivity
//! invariants (Morgan-style): round zero folds the atom's own properties,
//! and every further round folds the sorted invariants of its neighbors
//! together with the connecting bond orders. Symbols are emitted in sorted
//! order so that environments shared by related molecules line up diagonally
//! under local alignment.

use crate::chem::molecule::Molecule;
use crate::chem::FingerprintExtractor;
use crate::sequence::{pack_symbol, Symbol};
use crate::Result;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

fn fnv1a(hash: u64, value: u64) -> u64 {
    let mut h = hash;
    for byte in value.to_le_bytes() {
        h ^= byte as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

/// Fold a 64-bit invariant into the 8-bit environment class of a symbol.
fn fold_class(invariant: u64) -> u8 {
    invariant
        .to_le_bytes()
        .iter()
        .fold(0u8, |acc, &b| acc ^ b)
}

/// The default extractor: per-atom environment classes with a configurable
/// neighborhood radius.
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentExtractor {
    /// Number of neighbor-folding rounds. 0 uses atom properties alone;
    /// 1 (the default) includes immediate neighbors; 2 approximates ECFP4.
    pub radius: usize,
}

impl EnvironmentExtractor {
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }
}

impl Default for EnvironmentExtractor {
    fn default() -> Self {
        Self { radius: 1 }
    }
}

impl FingerprintExtractor for EnvironmentExtractor {
    fn extract(&self, mol: &Molecule) -> Result<Vec<Symbol>> {
        let n = mol.atom_count();
        if n == 0 {
            return Ok(Vec::new());
        }

        let rings = mol.ring_atoms();

        let mut invariants: Vec<u64> = Vec::with_capacity(n);
        for (i, atom) in mol.atoms().iter().enumerate() {
            let mut h = fnv1a(FNV_OFFSET, atom.atomic_number as u64);
            h = fnv1a(h, mol.degree(i) as u64);
            h = fnv1a(h, atom.implicit_hydrogens as u64);
            h = fnv1a(h, atom.formal_charge as i64 as u64);
            h = fnv1a(h, atom.aromatic as u64);
            h = fnv1a(h, rings[i] as u64);
            invariants.push(h);
        }

        for _ in 0..self.radius {
            let mut next = Vec::with_capacity(n);
            for i in 0..n {
                let mut neighborhood: Vec<(u64, u8)> = mol
                    .neighbors(i)
                    .map(|(j, order)| (invariants[j], order.code()))
                    .collect();
                neighborhood.sort_unstable();

                let mut h = fnv1a(FNV_OFFSET, invariants[i]);
                for (inv, order) in neighborhood {
                    h = fnv1a(h, inv);
                    h = fnv1a(h, order as u64);
                }
                next.push(h);
            }
            invariants = next;
        }

        // (symbol, full invariant, input index): the trailing fields make the
        // emission order total even when folded classes collide.
        let mut keyed: Vec<(Symbol, u64, usize)> = mol
            .atoms()
            .iter()
            .enumerate()
            .map(|(i, atom)| {
                (
                    pack_symbol(atom.atomic_number, fold_class(invariants[i])),
                    invariants[i],
                    i,
                )
            })
            .collect();
        keyed.sort_unstable();

        Ok(keyed.into_iter().map(|(symbol, _, _)| symbol).collect())
    }
}
