//! SMILES-subset parser producing the molecular graph.
//!
//! Covers the organic subset, bracket atoms with charge and hydrogen counts,
//! ring closures (including `%nn`), branches, explicit bond symbols, aromatic
//! lowercase notation, and `.`-separated components. Stereo markers and
//! isotope prefixes are accepted and discarded; the fingerprint model does
//! not distinguish them.

use std::collections::HashMap;

use crate::chem::molecule::{Atom, Bond, BondOrder, Molecule};
use crate::{MolblastError, Result};

/// Parse a SMILES string into a [`Molecule`].
pub fn parse(text: &str) -> Result<Molecule> {
    let mut parser = Parser::new(text);
    parser.run()?;
    parser.finish()
}

fn atomic_number(symbol: &str) -> Option<u8> {
    Some(match symbol {
        "H" => 1,
        "B" => 5,
        "C" => 6,
        "N" => 7,
        "O" => 8,
        "F" => 9,
        "Na" => 11,
        "Mg" => 12,
        "Si" => 14,
        "P" => 15,
        "S" => 16,
        "Cl" => 17,
        "K" => 19,
        "Ca" => 20,
        "Fe" => 26,
        "Cu" => 29,
        "Zn" => 30,
        "As" => 33,
        "Se" => 34,
        "Br" => 35,
        "I" => 53,
        _ => return None,
    })
}

/// Normal valence used to fill implicit hydrogens on neutral organic-subset
/// atoms. Bracket atoms carry their hydrogen count explicitly.
fn target_valence(atomic_number: u8) -> Option<u8> {
    Some(match atomic_number {
        5 => 3,  // B
        6 => 4,  // C
        7 => 3,  // N
        8 => 2,  // O
        9 => 1,  // F
        15 => 3, // P
        16 => 2, // S
        17 => 1, // Cl
        35 => 1, // Br
        53 => 1, // I
        _ => return None,
    })
}

fn is_organic_start(ch: u8) -> bool {
    matches!(
        ch,
        b'B' | b'C' | b'N' | b'O' | b'P' | b'S' | b'F' | b'I'
            | b'b' | b'c' | b'n' | b'o' | b'p' | b's'
    )
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// Whether each atom came from a bracket expression (its hydrogen count
    /// is then explicit and must not be refilled).
    bracketed: Vec<bool>,
    /// Open ring closures: digit -> (atom index, bond symbol seen at opening).
    open_rings: HashMap<u16, (usize, Option<BondOrder>)>,
    branch_stack: Vec<usize>,
    prev_atom: Option<usize>,
    pending_bond: Option<BondOrder>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            input: text.as_bytes(),
            pos: 0,
            atoms: Vec::new(),
            bonds: Vec::new(),
            bracketed: Vec::new(),
            open_rings: HashMap::new(),
            branch_stack: Vec::new(),
            prev_atom: None,
            pending_bond: None,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn fail(&self, msg: impl Into<String>) -> MolblastError {
        MolblastError::Parse(format!("{} at position {}", msg.into(), self.pos))
    }

    fn run(&mut self) -> Result<()> {
        while let Some(ch) = self.peek() {
            match ch {
                b'(' => {
                    self.bump();
                    match self.prev_atom {
                        Some(prev) => self.branch_stack.push(prev),
                        None => return Err(self.fail("branch opened before any atom")),
                    }
                }
                b')' => {
                    self.bump();
                    self.prev_atom = Some(
                        self.branch_stack
                            .pop()
                            .ok_or_else(|| self.fail("unmatched ')'"))?,
                    );
                    self.pending_bond = None;
                }
                b'-' => {
                    self.bump();
                    self.pending_bond = Some(BondOrder::Single);
                }
                b'=' => {
                    self.bump();
                    self.pending_bond = Some(BondOrder::Double);
                }
                b'#' => {
                    self.bump();
                    self.pending_bond = Some(BondOrder::Triple);
                }
                b':' => {
                    self.bump();
                    self.pending_bond = Some(BondOrder::Aromatic);
                }
                b'/' | b'\\' => {
                    // Cis/trans markers; treated as plain single bonds.
                    self.bump();
                }
                b'%' => {
                    self.bump();
                    let label = self.ring_label_two_digit()?;
                    self.ring_closure(label)?;
                }
                b'0'..=b'9' => {
                    self.bump();
                    self.ring_closure((ch - b'0') as u16)?;
                }
                b'[' => self.bracket_atom()?,
                b'.' => {
                    self.bump();
                    self.prev_atom = None;
                    self.pending_bond = None;
                }
                _ if is_organic_start(ch) => self.organic_atom(ch)?,
                _ => {
                    return Err(self.fail(format!("unexpected character '{}'", ch as char)));
                }
            }
        }
        Ok(())
    }

    fn organic_atom(&mut self, ch: u8) -> Result<()> {
        self.bump();
        let aromatic = ch.is_ascii_lowercase();
        let upper = ch.to_ascii_uppercase();

        // Two-letter organic-subset symbols are never aromatic.
        let symbol = match (upper, self.peek()) {
            (b'B', Some(b'r')) if !aromatic => {
                self.bump();
                "Br".to_string()
            }
            (b'C', Some(b'l')) if !aromatic => {
                self.bump();
                "Cl".to_string()
            }
            _ => (upper as char).to_string(),
        };

        let number = atomic_number(&symbol)
            .ok_or_else(|| self.fail(format!("unknown element '{symbol}'")))?;
        self.push_atom(
            Atom {
                atomic_number: number,
                formal_charge: 0,
                aromatic,
                implicit_hydrogens: 0,
            },
            false,
        );
        Ok(())
    }

    fn bracket_atom(&mut self) -> Result<()> {
        self.bump(); // '['

        // Isotope prefix: parsed and dropped.
        while matches!(self.peek(), Some(d) if d.is_ascii_digit()) {
            self.bump();
        }

        let first = self
            .bump()
            .ok_or_else(|| self.fail("unterminated bracket atom"))?;
        if !first.is_ascii_alphabetic() {
            return Err(self.fail("expected element symbol in bracket atom"));
        }
        let aromatic = first.is_ascii_lowercase();
        let upper = first.to_ascii_uppercase();

        let symbol = match self.peek() {
            // 'H' after a symbol is a hydrogen count, never a two-letter element.
            Some(next) if next.is_ascii_lowercase() => {
                let two = format!("{}{}", upper as char, next as char);
                if atomic_number(&two).is_some() {
                    self.bump();
                    two
                } else {
                    (upper as char).to_string()
                }
            }
            _ => (upper as char).to_string(),
        };
        let number = atomic_number(&symbol)
            .ok_or_else(|| self.fail(format!("unknown element '{symbol}'")))?;

        // Chirality markers: dropped.
        while self.peek() == Some(b'@') {
            self.bump();
        }

        let mut hydrogens = 0u8;
        if self.peek() == Some(b'H') {
            self.bump();
            hydrogens = match self.peek() {
                Some(d) if d.is_ascii_digit() => {
                    self.bump();
                    d - b'0'
                }
                _ => 1,
            };
        }

        let mut charge = 0i8;
        match self.peek() {
            Some(sign @ (b'+' | b'-')) => {
                self.bump();
                let unit: i8 = if sign == b'+' { 1 } else { -1 };
                charge = match self.peek() {
                    Some(d) if d.is_ascii_digit() => {
                        self.bump();
                        unit * (d - b'0') as i8
                    }
                    _ => {
                        let mut c = unit;
                        while self.peek() == Some(sign) {
                            self.bump();
                            c = c.saturating_add(unit);
                        }
                        c
                    }
                };
            }
            _ => {}
        }

        if self.bump() != Some(b']') {
            return Err(self.fail("expected ']'"));
        }

        self.push_atom(
            Atom {
                atomic_number: number,
                formal_charge: charge,
                aromatic,
                implicit_hydrogens: hydrogens,
            },
            true,
        );
        Ok(())
    }

    fn push_atom(&mut self, atom: Atom, from_bracket: bool) {
        let idx = self.atoms.len();
        self.atoms.push(atom);
        self.bracketed.push(from_bracket);

        if let Some(prev) = self.prev_atom {
            let order = self.bond_order_with(prev, idx);
            self.bonds.push(Bond {
                a: prev,
                b: idx,
                order,
            });
        }
        self.pending_bond = None;
        self.prev_atom = Some(idx);
    }

    /// Resolve the order of the bond being closed toward `to`, defaulting to
    /// aromatic when both ends are aromatic atoms and no symbol was written.
    fn bond_order_with(&mut self, from: usize, to: usize) -> BondOrder {
        match self.pending_bond.take() {
            Some(order) => order,
            None if self.atoms[from].aromatic && self.atoms[to].aromatic => BondOrder::Aromatic,
            None => BondOrder::Single,
        }
    }

    fn ring_label_two_digit(&mut self) -> Result<u16> {
        let d1 = self.bump().ok_or_else(|| self.fail("expected digit after '%'"))?;
        let d2 = self.bump().ok_or_else(|| self.fail("expected digit after '%'"))?;
        if !d1.is_ascii_digit() || !d2.is_ascii_digit() {
            return Err(self.fail("invalid ring label after '%'"));
        }
        Ok((d1 - b'0') as u16 * 10 + (d2 - b'0') as u16)
    }

    fn ring_closure(&mut self, label: u16) -> Result<()> {
        let current = self
            .prev_atom
            .ok_or_else(|| self.fail("ring closure before any atom"))?;

        if let Some((open_atom, open_bond)) = self.open_rings.remove(&label) {
            let order = match self.pending_bond.take().or(open_bond) {
                Some(order) => order,
                None if self.atoms[open_atom].aromatic && self.atoms[current].aromatic => {
                    BondOrder::Aromatic
                }
                None => BondOrder::Single,
            };
            self.bonds.push(Bond {
                a: open_atom,
                b: current,
                order,
            });
        } else {
            self.open_rings
                .insert(label, (current, self.pending_bond.take()));
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Molecule> {
        if !self.open_rings.is_empty() {
            let mut labels: Vec<u16> = self.open_rings.keys().copied().collect();
            labels.sort_unstable();
            return Err(MolblastError::Parse(format!(
                "unmatched ring closure label(s): {labels:?}"
            )));
        }
        if !self.branch_stack.is_empty() {
            return Err(MolblastError::Parse(format!(
                "{} unclosed '(' in SMILES",
                self.branch_stack.len()
            )));
        }

        self.fill_implicit_hydrogens();
        Ok(Molecule::new(self.atoms, self.bonds))
    }

    fn fill_implicit_hydrogens(&mut self) {
        for i in 0..self.atoms.len() {
            if self.bracketed[i] {
                continue;
            }
            let atom = self.atoms[i];
            let Some(target) = target_valence(atom.atomic_number) else {
                continue;
            };
            // One valence goes to the pi system of an aromatic atom.
            let capacity = if atom.aromatic {
                target.saturating_sub(1)
            } else {
                target
            };
            let used = self
                .bonds
                .iter()
                .filter(|b| b.a == i || b.b == i)
                .fold(0u32, |acc, b| acc.saturating_add(u32::from(b.order.valence())));
            self.atoms[i].implicit_hydrogens = u32::from(capacity).saturating_sub(used) as u8;
        }
    }
}
