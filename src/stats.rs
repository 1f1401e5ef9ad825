//! Karlin-Altschul style significance statistics.
//!
//! Raw alignment scores are comparable only under one scoring scheme; the
//! bit score normalizes them, and the expectation value says how many hits
//! of at least that score a database of this size would produce by chance.

use serde::{Deserialize, Serialize};

use crate::align::Alignment;

/// Calibration constants of the fingerprint scoring scheme.
///
/// These are fixed configuration values, never fitted at runtime; the
/// defaults were calibrated against the default substitution scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KarlinParams {
    pub lambda: f64,
    pub k: f64,
}

impl Default for KarlinParams {
    fn default() -> Self {
        Self {
            lambda: 0.30,
            k: 0.10,
        }
    }
}

/// `(lambda * S - ln K) / ln 2`.
pub fn bit_score(raw_score: i32, params: &KarlinParams) -> f64 {
    (params.lambda * raw_score as f64 - params.k.ln()) / 2.0_f64.ln()
}

/// `K * m * N * exp(-lambda * S)` for a query of `m` symbols against a
/// database of `N` total symbols.
///
/// The value grows with the database, so it must be recomputed whenever the
/// database changes; it is never a function of the raw score alone.
pub fn expect_value(
    raw_score: i32,
    query_len: usize,
    database_symbols: u64,
    params: &KarlinParams,
) -> f64 {
    params.k
        * query_len as f64
        * database_symbols as f64
        * (-params.lambda * raw_score as f64).exp()
}

/// Derived significance figures for one alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentStats {
    pub bit_score: f64,
    pub e_value: f64,
    pub percent_identity: f64,
    pub percent_positives: f64,
    pub percent_query_coverage: f64,
}

/// Compute the statistics block for one alignment.
///
/// Identity and positives are taken over the aligned columns, gaps
/// included; positives count identical columns too. All percentages are
/// clamped to `[0, 100]`, and a zero-length alignment reports zero instead
/// of dividing by zero.
pub fn compute(
    alignment: &Alignment,
    query_len: usize,
    database_symbols: u64,
    params: &KarlinParams,
) -> AlignmentStats {
    AlignmentStats {
        bit_score: bit_score(alignment.raw_score, params),
        e_value: expect_value(alignment.raw_score, query_len, database_symbols, params),
        percent_identity: percentage(alignment.matches, alignment.columns),
        percent_positives: percentage(alignment.matches + alignment.positives, alignment.columns),
        percent_query_coverage: percentage(alignment.query_span(), query_len),
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 100.0).clamp(0.0, 100.0)
}
