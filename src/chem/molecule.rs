//! Minimal molecular graph consumed by the fingerprint extractor.

/// Bond order between two atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Contribution to an atom's valence. Aromatic bonds count as one sigma
    /// bond; the pi system is handled separately by the hydrogen filler.
    pub fn valence(self) -> u8 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }

    /// Stable small integer used when hashing environments.
    pub fn code(self) -> u8 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Aromatic => 4,
        }
    }
}

/// An atom node. Only the properties the extractor folds into an environment
/// class are kept; stereo descriptors and isotopes are dropped at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atom {
    pub atomic_number: u8,
    pub formal_charge: i8,
    pub aromatic: bool,
    pub implicit_hydrogens: u8,
}

/// An undirected bond between two atom indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub order: BondOrder,
}

/// A parsed structure: atoms, bonds, and the adjacency derived from them.
#[derive(Debug, Clone)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// adjacency[atom] = (neighbor atom, bond index)
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        let mut adjacency = vec![Vec::new(); atoms.len()];
        for (i, bond) in bonds.iter().enumerate() {
            adjacency[bond.a].push((bond.b, i));
            adjacency[bond.b].push((bond.a, i));
        }
        Self {
            atoms,
            bonds,
            adjacency,
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Graph degree (explicit bonds only).
    pub fn degree(&self, atom: usize) -> usize {
        self.adjacency[atom].len()
    }

    /// Neighbors of an atom with the connecting bond order.
    pub fn neighbors(&self, atom: usize) -> impl Iterator<Item = (usize, BondOrder)> + '_ {
        self.adjacency[atom]
            .iter()
            .map(move |&(n, bi)| (n, self.bonds[bi].order))
    }

    /// Mark every atom that lies on at least one cycle.
    ///
    /// Builds a spanning forest; each non-tree edge closes a cycle through the
    /// lowest common ancestor of its endpoints, and the union of those cycles
    /// touches exactly the cyclic atoms.
    pub fn ring_atoms(&self) -> Vec<bool> {
        let n = self.atoms.len();
        let mut parent = vec![usize::MAX; n];
        let mut depth = vec![usize::MAX; n];
        let mut in_ring = vec![false; n];

        for root in 0..n {
            if depth[root] != usize::MAX {
                continue;
            }
            depth[root] = 0;
            let mut stack = vec![root];
            while let Some(u) = stack.pop() {
                for &(v, _) in &self.adjacency[u] {
                    if depth[v] == usize::MAX {
                        parent[v] = u;
                        depth[v] = depth[u] + 1;
                        stack.push(v);
                    } else if parent[u] != v {
                        // Non-tree edge: walk both endpoints up to their
                        // common ancestor, marking the enclosed cycle.
                        let (mut x, mut y) = (u, v);
                        while x != y {
                            if depth[x] >= depth[y] {
                                in_ring[x] = true;
                                x = parent[x];
                            } else {
                                in_ring[y] = true;
                                y = parent[y];
                            }
                        }
                        in_ring[x] = true;
                    }
                }
            }
        }

        in_ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carbon() -> Atom {
        Atom {
            atomic_number: 6,
            formal_charge: 0,
            aromatic: false,
            implicit_hydrogens: 0,
        }
    }

    fn chain(n: usize) -> Molecule {
        let atoms = vec![carbon(); n];
        let bonds = (1..n)
            .map(|i| Bond {
                a: i - 1,
                b: i,
                order: BondOrder::Single,
            })
            .collect();
        Molecule::new(atoms, bonds)
    }

    #[test]
    fn adjacency_is_symmetric() {
        let mol = chain(3);
        assert_eq!(mol.degree(0), 1);
        assert_eq!(mol.degree(1), 2);
        assert_eq!(mol.degree(2), 1);
    }

    #[test]
    fn chain_has_no_ring_atoms() {
        let mol = chain(5);
        assert!(mol.ring_atoms().iter().all(|&r| !r));
    }

    #[test]
    fn cycle_atoms_are_marked() {
        // Cyclopropane with a methyl substituent: atoms 0-1-2 form the ring.
        let atoms = vec![carbon(); 4];
        let bonds = vec![
            Bond { a: 0, b: 1, order: BondOrder::Single },
            Bond { a: 1, b: 2, order: BondOrder::Single },
            Bond { a: 2, b: 0, order: BondOrder::Single },
            Bond { a: 2, b: 3, order: BondOrder::Single },
        ];
        let mol = Molecule::new(atoms, bonds);
        assert_eq!(mol.ring_atoms(), vec![true, true, true, false]);
    }

    #[test]
    fn bridge_between_rings_is_acyclic() {
        // Two triangles joined by a two-atom chain; the chain stays unmarked.
        let atoms = vec![carbon(); 8];
        let bonds = vec![
            Bond { a: 0, b: 1, order: BondOrder::Single },
            Bond { a: 1, b: 2, order: BondOrder::Single },
            Bond { a: 2, b: 0, order: BondOrder::Single },
            Bond { a: 2, b: 3, order: BondOrder::Single },
            Bond { a: 3, b: 4, order: BondOrder::Single },
            Bond { a: 4, b: 5, order: BondOrder::Single },
            Bond { a: 5, b: 6, order: BondOrder::Single },
            Bond { a: 6, b: 7, order: BondOrder::Single },
            Bond { a: 7, b: 5, order: BondOrder::Single },
        ];
        let mol = Molecule::new(atoms, bonds);
        let rings = mol.ring_atoms();
        assert!(rings[0] && rings[1] && rings[2]);
        assert!(!rings[3] && !rings[4]);
        assert!(rings[5] && rings[6] && rings[7]);
    }
}
