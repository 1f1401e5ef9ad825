//! Hit output: the classic one-line-per-hit report plus a headerless
//! tab-separated format for downstream tooling.

use std::io::{self, Write};

use crate::search::SearchHit;

pub const NO_HITS_MESSAGE: &str = "No significant hits found!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Plain,
    Tsv,
}

/// Write the ranked hits for one query. The plain format prints
/// [`NO_HITS_MESSAGE`] for an empty list; the tab-separated format stays
/// silent so consumers can treat every line as a record.
pub fn write_hits<W: Write>(
    out: &mut W,
    query_label: &str,
    hits: &[SearchHit],
    format: ReportFormat,
) -> io::Result<()> {
    match format {
        ReportFormat::Plain => {
            if hits.is_empty() {
                return writeln!(out, "{NO_HITS_MESSAGE}");
            }
            for hit in hits {
                writeln!(out, "{}", plain_line(query_label, hit))?;
            }
            Ok(())
        }
        ReportFormat::Tsv => {
            for hit in hits {
                writeln!(out, "{}", tsv_line(query_label, hit))?;
            }
            Ok(())
        }
    }
}

pub fn plain_line(query_label: &str, hit: &SearchHit) -> String {
    format!(
        "Query {}, Subject {}, bit-Score {:.2}, rawScore {}, query-Coverage {:.1}%, eValue {:.2e}, Identity {:.1}%, Positives {:.1}%",
        query_label,
        hit.subject_id,
        hit.stats.bit_score,
        hit.alignment.raw_score,
        hit.stats.percent_query_coverage,
        hit.stats.e_value,
        hit.stats.percent_identity,
        hit.stats.percent_positives,
    )
}

pub fn tsv_line(query_label: &str, hit: &SearchHit) -> String {
    format!(
        "{}\t{}\t{:.2}\t{}\t{:.1}\t{:.2e}\t{:.1}\t{:.1}",
        query_label,
        hit.subject_id,
        hit.stats.bit_score,
        hit.alignment.raw_score,
        hit.stats.percent_query_coverage,
        hit.stats.e_value,
        hit.stats.percent_identity,
        hit.stats.percent_positives,
    )
}
