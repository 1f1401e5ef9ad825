//! Substitution and gap scoring over fingerprint symbols.

use crate::sequence::{element_class, Symbol};
use crate::{MolblastError, Result};

/// Scoring scheme for fingerprint alignment.
///
/// Identical symbols reward with `match_score`; symbols sharing an element
/// class but differing in environment score `class_score` (the favorable
/// substitutions reported as positives); everything else is a plain
/// mismatch. Gaps are affine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerprintScoring {
    match_score: i32,
    class_score: i32,
    mismatch_score: i32,
    gap_open: i32,
    gap_extend: i32,
}

impl FingerprintScoring {
    /// Signs are enforced here so the alignment engine can assume a valid
    /// scheme: matches positive, substitutions non-positive, gaps negative.
    pub fn new(
        match_score: i32,
        class_score: i32,
        mismatch_score: i32,
        gap_open: i32,
        gap_extend: i32,
    ) -> Result<Self> {
        if match_score <= 0 {
            return Err(MolblastError::Config(format!(
                "match score must be positive, got {match_score}"
            )));
        }
        if class_score > 0 {
            return Err(MolblastError::Config(format!(
                "class score must not be positive, got {class_score}"
            )));
        }
        if mismatch_score >= 0 {
            return Err(MolblastError::Config(format!(
                "mismatch score must be negative, got {mismatch_score}"
            )));
        }
        if gap_open >= 0 || gap_extend >= 0 {
            return Err(MolblastError::Config(format!(
                "gap penalties must be negative, got open {gap_open} / extend {gap_extend}"
            )));
        }
        Ok(Self {
            match_score,
            class_score,
            mismatch_score,
            gap_open,
            gap_extend,
        })
    }

    pub fn score(&self, a: Symbol, b: Symbol) -> i32 {
        if a == b {
            self.match_score
        } else if element_class(a) == element_class(b) {
            self.class_score
        } else {
            self.mismatch_score
        }
    }

    /// A favorable but nonidentical pairing: same element, different
    /// environment.
    pub fn is_positive(&self, a: Symbol, b: Symbol) -> bool {
        a != b && element_class(a) == element_class(b)
    }

    pub fn match_score(&self) -> i32 {
        self.match_score
    }

    pub fn gap_open(&self) -> i32 {
        self.gap_open
    }

    pub fn gap_extend(&self) -> i32 {
        self.gap_extend
    }
}

impl Default for FingerprintScoring {
    fn default() -> Self {
        Self {
            match_score: 5,
            class_score: 0,
            mismatch_score: -4,
            gap_open: -10,
            gap_extend: -2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::pack_symbol;

    #[test]
    fn identical_symbols_score_a_match() {
        let scoring = FingerprintScoring::default();
        let s = pack_symbol(6, 17);
        assert_eq!(scoring.score(s, s), 5);
        assert!(!scoring.is_positive(s, s));
    }

    #[test]
    fn same_element_different_environment_is_positive() {
        let scoring = FingerprintScoring::default();
        let a = pack_symbol(6, 1);
        let b = pack_symbol(6, 2);
        assert_eq!(scoring.score(a, b), 0);
        assert!(scoring.is_positive(a, b));
    }

    #[test]
    fn different_elements_mismatch() {
        let scoring = FingerprintScoring::default();
        let a = pack_symbol(6, 1);
        let b = pack_symbol(7, 1);
        assert_eq!(scoring.score(a, b), -4);
        assert!(!scoring.is_positive(a, b));
    }

    #[test]
    fn sign_constraints_are_enforced() {
        assert!(FingerprintScoring::new(0, 0, -4, -10, -2).is_err());
        assert!(FingerprintScoring::new(5, 1, -4, -10, -2).is_err());
        assert!(FingerprintScoring::new(5, 0, 0, -10, -2).is_err());
        assert!(FingerprintScoring::new(5, 0, -4, 10, -2).is_err());
        assert!(FingerprintScoring::new(5, 0, -4, -10, 0).is_err());
        assert!(FingerprintScoring::new(5, 0, -4, -10, -2).is_ok());
    }
}
