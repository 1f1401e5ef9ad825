//! Smith-Waterman local alignment over fingerprint symbol sequences.
//!
//! The three-matrix affine-gap formulation with all scores floored at zero.
//! A pair may yield several disjoint regions: after each traceback the
//! consumed query and subject positions are masked to zero and the scan
//! repeats until the best remaining score falls below the minimum or the
//! region cap is reached.

use crate::align::scoring::FingerprintScoring;
use crate::sequence::Symbol;

/// Engine knobs for one search session.
#[derive(Debug, Clone, Copy)]
pub struct AlignConfig {
    pub scoring: FingerprintScoring,
    /// Lowest raw score a region may report.
    pub min_score: i32,
    /// Cap on regions extracted per sequence pair.
    pub max_regions: usize,
}

impl Default for AlignConfig {
    fn default() -> Self {
        let scoring = FingerprintScoring::default();
        Self {
            scoring,
            // A single identity already clears the bar, so self-hits of any
            // non-empty sequence are never filtered out.
            min_score: scoring.match_score(),
            max_regions: 8,
        }
    }
}

/// One local alignment region. Coordinates are half-open symbol ranges into
/// the respective sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    pub query_start: usize,
    pub query_end: usize,
    pub subject_start: usize,
    pub subject_end: usize,
    pub raw_score: i32,
    /// Identical columns.
    pub matches: usize,
    /// Favorable nonidentical columns (same element class).
    pub positives: usize,
    /// Total aligned columns, gaps included.
    pub columns: usize,
}

impl Alignment {
    pub fn query_span(&self) -> usize {
        self.query_end - self.query_start
    }

    pub fn subject_span(&self) -> usize {
        self.subject_end - self.subject_start
    }
}

/// Extract the disjoint high-scoring local regions of a pair, best first.
///
/// Empty input on either side, or no region reaching `min_score`, yields an
/// empty vector. Scores within the result are non-increasing: masking only
/// removes candidate paths, so no later region can beat an earlier one.
pub fn align(query: &[Symbol], subject: &[Symbol], config: &AlignConfig) -> Vec<Alignment> {
    if query.is_empty() || subject.is_empty() {
        return Vec::new();
    }

    let mut used_q = vec![false; query.len()];
    let mut used_s = vec![false; subject.len()];
    let mut regions = Vec::new();

    while regions.len() < config.max_regions {
        match best_region(query, subject, &used_q, &used_s, &config.scoring) {
            Some(region) if region.raw_score >= config.min_score => {
                for flag in &mut used_q[region.query_start..region.query_end] {
                    *flag = true;
                }
                for flag in &mut used_s[region.subject_start..region.subject_end] {
                    *flag = true;
                }
                regions.push(region);
            }
            _ => break,
        }
    }
    regions
}

/// One full DP scan honoring the position masks, returning the single best
/// region or `None` when nothing scores above zero.
fn best_region(
    query: &[Symbol],
    subject: &[Symbol],
    used_q: &[bool],
    used_s: &[bool],
    scoring: &FingerprintScoring,
) -> Option<Alignment> {
    let m = query.len();
    let n = subject.len();
    let cols = n + 1;

    let mut h = vec![0i32; (m + 1) * cols];
    let mut e = vec![0i32; (m + 1) * cols];
    let mut f = vec![0i32; (m + 1) * cols];
    let idx = |i: usize, j: usize| -> usize { i * cols + j };

    let gap_open = scoring.gap_open();
    let gap_extend = scoring.gap_extend();

    let mut max_score = 0i32;
    let mut max_i = 0usize;
    let mut max_j = 0usize;

    for i in 1..=m {
        for j in 1..=n {
            // Cells over positions consumed by an earlier region stay at
            // zero, so no path can run through them.
            if used_q[i - 1] || used_s[j - 1] {
                continue;
            }

            e[idx(i, j)] = (h[idx(i, j - 1)] + gap_open)
                .max(e[idx(i, j - 1)] + gap_extend)
                .max(0);
            f[idx(i, j)] = (h[idx(i - 1, j)] + gap_open)
                .max(f[idx(i - 1, j)] + gap_extend)
                .max(0);

            let diag = h[idx(i - 1, j - 1)] + scoring.score(query[i - 1], subject[j - 1]);
            let best = diag.max(e[idx(i, j)]).max(f[idx(i, j)]).max(0);
            h[idx(i, j)] = best;

            // Strict comparison keeps the first maximum in scan order, so
            // tied regions resolve identically on every run.
            if best > max_score {
                max_score = best;
                max_i = i;
                max_j = j;
            }
        }
    }

    if max_score == 0 {
        return None;
    }

    // Traceback from the maximum cell, preferring diagonal steps, until H
    // reaches zero.
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        H,
        E,
        F,
    }

    let mut i = max_i;
    let mut j = max_j;
    let mut state = State::H;
    let mut matches = 0usize;
    let mut positives = 0usize;
    let mut columns = 0usize;

    while i > 0 || j > 0 {
        if state == State::H && h[idx(i, j)] == 0 {
            break;
        }
        match state {
            State::H => {
                if i > 0 && j > 0 {
                    let diag = h[idx(i - 1, j - 1)] + scoring.score(query[i - 1], subject[j - 1]);
                    if h[idx(i, j)] == diag {
                        columns += 1;
                        if query[i - 1] == subject[j - 1] {
                            matches += 1;
                        } else if scoring.is_positive(query[i - 1], subject[j - 1]) {
                            positives += 1;
                        }
                        i -= 1;
                        j -= 1;
                    } else if h[idx(i, j)] == e[idx(i, j)] {
                        state = State::E;
                    } else {
                        state = State::F;
                    }
                } else if j > 0 {
                    state = State::E;
                } else {
                    state = State::F;
                }
            }
            State::E => {
                columns += 1;
                if e[idx(i, j)] == h[idx(i, j - 1)] + gap_open {
                    state = State::H;
                }
                j -= 1;
            }
            State::F => {
                columns += 1;
                if f[idx(i, j)] == h[idx(i - 1, j)] + gap_open {
                    state = State::H;
                }
                i -= 1;
            }
        }
    }

    Some(Alignment {
        query_start: i,
        query_end: max_i,
        subject_start: j,
        subject_end: max_j,
        raw_score: max_score,
        matches,
        positives,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::pack_symbol;

    fn seq(classes: &[(u8, u8)]) -> Vec<Symbol> {
        classes
            .iter()
            .map(|&(element, env)| pack_symbol(element, env))
            .collect()
    }

    #[test]
    fn self_alignment_covers_the_full_sequence() {
        let s = seq(&[(6, 1), (6, 2), (7, 1), (8, 3), (6, 1)]);
        let regions = align(&s, &s, &AlignConfig::default());
        assert_eq!(regions.len(), 1);
        let r = regions[0];
        assert_eq!((r.query_start, r.query_end), (0, 5));
        assert_eq!((r.subject_start, r.subject_end), (0, 5));
        assert_eq!(r.raw_score, 25);
        assert_eq!(r.matches, 5);
        assert_eq!(r.columns, 5);
    }

    #[test]
    fn local_region_ignores_unrelated_flanks() {
        // Shared core (6,1)(6,2)(8,1) buried in flanks that agree on nothing.
        let query = seq(&[(1, 1), (1, 2), (6, 1), (6, 2), (8, 1), (1, 3)]);
        let subject = seq(&[(9, 9), (6, 1), (6, 2), (8, 1), (9, 8), (9, 7)]);
        let regions = align(&query, &subject, &AlignConfig::default());
        assert_eq!(regions.len(), 1);
        let r = regions[0];
        assert_eq!(r.raw_score, 15);
        assert_eq!((r.query_start, r.query_end), (2, 5));
        assert_eq!((r.subject_start, r.subject_end), (1, 4));
        assert_eq!(r.matches, 3);
    }

    #[test]
    fn class_substitutions_count_as_positives() {
        let query = seq(&[(6, 1), (6, 2), (6, 3)]);
        let subject = seq(&[(6, 1), (6, 9), (6, 3)]);
        let regions = align(&query, &subject, &AlignConfig::default());
        assert_eq!(regions.len(), 1);
        let r = regions[0];
        // Bridging the class substitution (0) beats two split regions.
        assert_eq!(r.raw_score, 10);
        assert_eq!(r.matches, 2);
        assert_eq!(r.positives, 1);
        assert_eq!(r.columns, 3);
    }

    #[test]
    fn disjoint_regions_are_both_reported() {
        // Two conserved blocks separated by spans that only mismatch; the
        // bridge costs more than restarting, so two regions come back.
        let query = seq(&[
            (6, 1),
            (6, 2),
            (6, 3),
            (9, 1),
            (9, 2),
            (9, 3),
            (9, 4),
            (8, 1),
            (8, 2),
            (8, 3),
        ]);
        let subject = seq(&[
            (6, 1),
            (6, 2),
            (6, 3),
            (1, 1),
            (1, 2),
            (8, 1),
            (8, 2),
            (8, 3),
        ]);
        let regions = align(&query, &subject, &AlignConfig::default());
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].raw_score, 15);
        assert_eq!(regions[1].raw_score, 15);
        // First region keeps the earliest coordinates; both are disjoint.
        assert_eq!((regions[0].query_start, regions[0].query_end), (0, 3));
        assert_eq!((regions[1].query_start, regions[1].query_end), (7, 10));
        assert!(regions[0].query_end <= regions[1].query_start);
        assert!(regions[0].subject_end <= regions[1].subject_start);
    }

    #[test]
    fn region_cap_limits_extraction() {
        let query = seq(&[
            (6, 1),
            (6, 2),
            (6, 3),
            (9, 1),
            (9, 2),
            (9, 3),
            (9, 4),
            (8, 1),
            (8, 2),
            (8, 3),
        ]);
        let subject = seq(&[
            (6, 1),
            (6, 2),
            (6, 3),
            (1, 1),
            (1, 2),
            (8, 1),
            (8, 2),
            (8, 3),
        ]);
        let config = AlignConfig {
            max_regions: 1,
            ..AlignConfig::default()
        };
        let regions = align(&query, &subject, &config);
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn nothing_above_threshold_is_empty() {
        let query = seq(&[(6, 1), (6, 2)]);
        let subject = seq(&[(9, 1), (9, 2)]);
        assert!(align(&query, &subject, &AlignConfig::default()).is_empty());
    }

    #[test]
    fn min_score_filters_weak_regions() {
        let query = seq(&[(6, 1)]);
        let subject = seq(&[(6, 1)]);
        let config = AlignConfig {
            min_score: 6,
            ..AlignConfig::default()
        };
        assert!(align(&query, &subject, &config).is_empty());
    }

    #[test]
    fn empty_input_is_empty_output() {
        let s = seq(&[(6, 1)]);
        assert!(align(&[], &s, &AlignConfig::default()).is_empty());
        assert!(align(&s, &[], &AlignConfig::default()).is_empty());
    }

    #[test]
    fn gapped_alignment_outscores_split_regions() {
        // Subject lacks one interior symbol; a single gap (-10) keeps the
        // rest of the diagonal worth 8 * 5 = 40.
        let query = seq(&[
            (6, 1),
            (6, 2),
            (6, 3),
            (6, 4),
            (7, 1),
            (8, 1),
            (8, 2),
            (8, 3),
            (8, 4),
        ]);
        let subject = seq(&[
            (6, 1),
            (6, 2),
            (6, 3),
            (6, 4),
            (8, 1),
            (8, 2),
            (8, 3),
            (8, 4),
        ]);
        let regions = align(&query, &subject, &AlignConfig::default());
        assert_eq!(regions.len(), 1);
        let r = regions[0];
        assert_eq!(r.raw_score, 30);
        assert_eq!(r.matches, 8);
        assert_eq!(r.columns, 9);
        assert_eq!(r.query_span(), 9);
        assert_eq!(r.subject_span(), 8);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let query = seq(&[(6, 1), (7, 2), (6, 1), (8, 3), (6, 2), (7, 2)]);
        let subject = seq(&[(8, 3), (6, 1), (7, 2), (6, 2), (6, 1), (9, 9)]);
        let config = AlignConfig::default();
        let first = align(&query, &subject, &config);
        let second = align(&query, &subject, &config);
        assert_eq!(first, second);
    }
}
