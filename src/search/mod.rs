//! The search orchestrator: scan a database against one query, score every
//! subject, rank, truncate.
//!
//! Subjects are fetched, aligned and scored on the rayon pool in contiguous
//! ordinal shards sharing one database handle. Workers only ever produce
//! locally; the final order comes from [`rank`] alone, so thread scheduling
//! can never change the output.

pub mod ranking;

pub use ranking::{by_evalue, by_significance, rank, HitComparator, SearchHit};

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::align::{self, AlignConfig};
use crate::chem::{encode_structure, FingerprintExtractor, StructureParser};
use crate::db::{self, BuildSummary, Database, DatabaseStatus, DbPaths};
use crate::sequence::FingerprintSequence;
use crate::stats::{self, KarlinParams};
use crate::{MolblastError, Result};

/// Cooperative cancellation flag shared between a search and its caller.
/// Cancelling mid-search discards all partial results.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Knobs for one search session.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Hits kept after ranking.
    pub top_k: usize,
    /// Fraction of the database prefix to scan, in `(0, 1]`. Values below 1
    /// trade recall for speed on large databases.
    pub sample_fraction: f64,
    pub align: AlignConfig,
    pub karlin: KarlinParams,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            top_k: 10,
            sample_fraction: 1.0,
            align: AlignConfig::default(),
            karlin: KarlinParams::default(),
        }
    }
}

impl SearchOptions {
    fn validate(&self) -> Result<()> {
        if !(self.sample_fraction > 0.0 && self.sample_fraction <= 1.0) {
            return Err(MolblastError::Config(format!(
                "sample fraction must lie in (0, 1], got {}",
                self.sample_fraction
            )));
        }
        Ok(())
    }

    fn scan_count(&self, total: u64) -> u64 {
        ((total as f64) * self.sample_fraction).ceil() as u64
    }
}

/// Align the query against every subject in the scanned prefix and return
/// the ranked top hits.
///
/// A database read failure aborts the whole search: a handle that cannot
/// produce one record cannot be trusted for the rest. Cancellation surfaces
/// as [`MolblastError::Cancelled`] with no hits.
pub fn search(
    query: &FingerprintSequence,
    database: &Database,
    options: &SearchOptions,
    comparator: HitComparator,
    cancel: &CancelToken,
) -> Result<Vec<SearchHit>> {
    options.validate()?;
    let scan = options.scan_count(database.count()) as usize;
    if scan == 0 {
        return Ok(Vec::new());
    }

    let shard = shard_size(scan);
    debug!(
        scan,
        shard,
        query_len = query.len(),
        store = %database.paths().format.display(),
        "scanning database"
    );

    let per_subject: Vec<Vec<SearchHit>> = (0..scan)
        .into_par_iter()
        .with_min_len(shard)
        .map(|ordinal| score_subject(query, database, ordinal as u64, options, cancel))
        .collect::<Result<_>>()?;

    let hits: Vec<SearchHit> = per_subject.into_iter().flatten().collect();
    let ranked = rank(hits, options.top_k, comparator);
    info!(scanned = scan, hits = ranked.len(), "search complete");
    Ok(ranked)
}

fn score_subject(
    query: &FingerprintSequence,
    database: &Database,
    ordinal: u64,
    options: &SearchOptions,
    cancel: &CancelToken,
) -> Result<Vec<SearchHit>> {
    if cancel.is_cancelled() {
        return Err(MolblastError::Cancelled);
    }
    let subject = database.get(ordinal)?;
    let regions = align::align(query.symbols(), subject.symbols(), &options.align);
    let hits = regions
        .into_iter()
        .map(|alignment| SearchHit {
            subject_ordinal: ordinal,
            subject_id: subject.id().to_string(),
            subject_description: subject.description().to_string(),
            subject_len: subject.len(),
            stats: stats::compute(
                &alignment,
                query.len(),
                database.total_symbols(),
                &options.karlin,
            ),
            alignment,
        })
        .collect();
    Ok(hits)
}

/// Shard size for one database scan. Alignment dominates per-subject cost,
/// so shards are kept small enough that every thread stays busy.
fn shard_size(total: usize) -> usize {
    let threads = rayon::current_num_threads().max(1);
    let ideal = total / (threads * 4).max(1);
    ideal.clamp(1, 256)
}

/// Build the artifact pair next to `source`, replacing whatever was there.
pub fn build_database<P, X>(
    source: &Path,
    parser: &P,
    extractor: &X,
    limit: Option<usize>,
) -> Result<BuildSummary>
where
    P: StructureParser + ?Sized,
    X: FingerprintExtractor + ?Sized,
{
    let paths = DbPaths::derive(source);
    db::build(source, &paths, parser, extractor, limit)
}

/// End-to-end entry point: make sure the database next to `source` is
/// usable, convert the query, search, rank.
///
/// The freshness check runs exactly once; `Missing` and `Stale` both
/// trigger a full rebuild before the search proceeds. A query that cannot
/// be converted reports [`MolblastError::QueryConversion`].
pub fn search_source<P, X>(
    source: &Path,
    query_text: &str,
    parser: &P,
    extractor: &X,
    options: &SearchOptions,
    comparator: HitComparator,
    cancel: &CancelToken,
) -> Result<Vec<SearchHit>>
where
    P: StructureParser + ?Sized,
    X: FingerprintExtractor + ?Sized,
{
    let query = encode_structure("query", query_text, query_text, parser, extractor)
        .map_err(|e| MolblastError::QueryConversion(e.to_string()))?;

    let paths = DbPaths::derive(source);
    match DatabaseStatus::check(source, &paths) {
        DatabaseStatus::Fresh => {
            debug!(index = %paths.index.display(), "database is fresh");
        }
        status @ (DatabaseStatus::Missing | DatabaseStatus::Stale) => {
            info!(
                ?status,
                source = %source.display(),
                "database needs a rebuild"
            );
            db::build(source, &paths, parser, extractor, None)?;
        }
    }

    let database = Database::open(&paths)?;
    search(&query, &database, options, comparator, cancel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_count_rounds_up_and_respects_full_scans() {
        let mut options = SearchOptions::default();
        assert_eq!(options.scan_count(10), 10);
        options.sample_fraction = 0.25;
        assert_eq!(options.scan_count(10), 3);
        options.sample_fraction = 0.01;
        assert_eq!(options.scan_count(10), 1);
        assert_eq!(options.scan_count(0), 0);
    }

    #[test]
    fn out_of_range_fractions_are_rejected() {
        let mut options = SearchOptions::default();
        options.sample_fraction = 0.0;
        assert!(options.validate().is_err());
        options.sample_fraction = 1.5;
        assert!(options.validate().is_err());
        options.sample_fraction = 1.0;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn shards_cover_small_scans() {
        assert_eq!(shard_size(1), 1);
        assert!(shard_size(100_000) <= 256);
    }

    #[test]
    fn cancel_token_flips_once() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
        let shared = token.clone();
        assert!(shared.is_cancelled());
    }
}
