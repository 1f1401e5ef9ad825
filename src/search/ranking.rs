//! Ordering and truncation of scored search hits.

use std::cmp::Ordering;

use crate::align::Alignment;
use crate::stats::AlignmentStats;

/// One scored region of one database subject, with everything the report
/// layer needs to print it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub subject_ordinal: u64,
    pub subject_id: String,
    pub subject_description: String,
    pub subject_len: usize,
    pub alignment: Alignment,
    pub stats: AlignmentStats,
}

/// Comparators are passed to [`rank`] explicitly; there is no implicit
/// default order.
pub type HitComparator = fn(&SearchHit, &SearchHit) -> Ordering;

/// Bit score descending, then raw score descending, then subject id
/// ascending so equal scores rank the same way on every run.
pub fn by_significance(a: &SearchHit, b: &SearchHit) -> Ordering {
    b.stats
        .bit_score
        .total_cmp(&a.stats.bit_score)
        .then_with(|| b.alignment.raw_score.cmp(&a.alignment.raw_score))
        .then_with(|| a.subject_id.cmp(&b.subject_id))
}

/// Expectation value ascending, with the same tie chain as
/// [`by_significance`].
pub fn by_evalue(a: &SearchHit, b: &SearchHit) -> Ordering {
    a.stats
        .e_value
        .total_cmp(&b.stats.e_value)
        .then_with(|| b.alignment.raw_score.cmp(&a.alignment.raw_score))
        .then_with(|| a.subject_id.cmp(&b.subject_id))
}

/// Stable-sort `hits` under `comparator` and keep the best `top_k`.
pub fn rank(mut hits: Vec<SearchHit>, top_k: usize, comparator: HitComparator) -> Vec<SearchHit> {
    hits.sort_by(comparator);
    hits.truncate(top_k);
    hits
}
