//! Report payloads and assembly.
//!
//! The report is the single diagnostic artifact of a comparison. All float
//! fields in sub-structures are rounded to six decimals; the two terminal
//! scores (`dataset_similarity_equal_weighted`, `overall_score_with_coverage`)
//! keep full precision.

use serde::Serialize;

use crate::column_map::ColumnMapping;
use crate::config::CompareConfig;
use crate::key_match::{KeyMatch, MatchMode};
use crate::profile::ColumnProfile;
use crate::row_align::RowAlignment;
use crate::scoring::{ColumnScore, Scores};
use crate::table::Table;

pub(crate) fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Terminal comparison status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Row alignment is complete: every row on both sides is paired.
    Ok,
    /// A usable key exists but the alignment is not complete.
    PartialKeyMatch,
    /// No usable key, or no pair formed; all scores are zero.
    NoCompleteKeyMatch,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Ok => "ok",
            Status::PartialKeyMatch => "partial_key_match",
            Status::NoCompleteKeyMatch => "no_complete_key_match",
        };
        f.write_str(s)
    }
}

/// Echo of the effective configuration, with the clamped sample size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigEcho {
    pub reference_path: String,
    pub candidate_path: String,
    pub sample_size_mapping: usize,
    pub column_weighting: ColumnWeighting,
    pub missing_reference_column_score: f64,
    pub extra_candidate_columns_penalize: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnWeighting {
    pub columns: &'static str,
}

impl ConfigEcho {
    fn new(reference: &Table, candidate: &Table, config: &CompareConfig) -> ConfigEcho {
        ConfigEcho {
            reference_path: reference.source().display().to_string(),
            candidate_path: candidate.source().display().to_string(),
            sample_size_mapping: config.sample_size(),
            column_weighting: ColumnWeighting { columns: "equal" },
            missing_reference_column_score: 0.0,
            extra_candidate_columns_penalize: false,
        }
    }
}

/// Row/column counts plus the unique-non-empty columns in header order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableProfileSummary {
    pub row_count: usize,
    pub column_count: usize,
    pub unique_columns: Vec<String>,
}

impl TableProfileSummary {
    fn new(table: &Table, profiles: &[ColumnProfile]) -> TableProfileSummary {
        TableProfileSummary {
            row_count: table.row_count(),
            column_count: table.column_count(),
            unique_columns: table
                .headers()
                .iter()
                .zip(profiles)
                .filter(|(_, p)| p.is_unique_non_empty)
                .map(|(name, _)| name.clone())
                .collect(),
        }
    }
}

/// User-facing digest replicated from the detailed blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub status: Status,
    pub dataset_similarity_equal_weighted: f64,
    pub coverage_reference: f64,
    pub coverage_candidate: f64,
    pub overall_score_with_coverage: f64,
    pub matched_rows: usize,
    pub reference_rows: usize,
    pub candidate_rows: usize,
    pub mapped_reference_columns: usize,
    pub reference_columns_total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_match_mode: Option<MatchMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_reference_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_candidate_column: Option<String>,
}

impl Summary {
    fn new(
        status: Status,
        alignment: &RowAlignment,
        key_match: &KeyMatch,
        scores: &Scores,
    ) -> Summary {
        Summary {
            status,
            dataset_similarity_equal_weighted: scores.dataset_similarity_equal_weighted,
            coverage_reference: alignment.coverage_reference,
            coverage_candidate: alignment.coverage_candidate,
            overall_score_with_coverage: scores.overall_score_with_coverage,
            matched_rows: alignment.matched_rows,
            reference_rows: alignment.reference_rows,
            candidate_rows: alignment.candidate_rows,
            mapped_reference_columns: scores.mapped_reference_columns,
            reference_columns_total: scores.reference_columns_total,
            key_match_mode: key_match.match_mode,
            key_reference_column: key_match.reference_column.clone(),
            key_candidate_column: key_match.candidate_column.clone(),
        }
    }
}

/// The full diagnostic payload of one comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareReport {
    pub status: Status,
    pub summary: Summary,
    pub config: ConfigEcho,
    pub reference_profile: TableProfileSummary,
    pub candidate_profile: TableProfileSummary,
    pub row_alignment: RowAlignment,
    pub key_match: KeyMatch,
    pub column_mapping: ColumnMapping,
    pub scores: Scores,
}

pub fn serialize_report(report: &CompareReport) -> serde_json::Result<String> {
    serde_json::to_string(report)
}

pub fn serialize_report_pretty(report: &CompareReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Assembles the report for a comparison that produced at least one aligned
/// pair. `scores.overall_score_with_coverage` must already be set.
#[allow(clippy::too_many_arguments)]
pub(crate) fn assemble(
    reference: &Table,
    candidate: &Table,
    config: &CompareConfig,
    reference_profiles: &[ColumnProfile],
    candidate_profiles: &[ColumnProfile],
    alignment: RowAlignment,
    key_match: KeyMatch,
    column_mapping: ColumnMapping,
    scores: Scores,
) -> CompareReport {
    let status = if alignment.complete {
        Status::Ok
    } else {
        Status::PartialKeyMatch
    };

    CompareReport {
        status,
        summary: Summary::new(status, &alignment, &key_match, &scores),
        config: ConfigEcho::new(reference, candidate, config),
        reference_profile: TableProfileSummary::new(reference, reference_profiles),
        candidate_profile: TableProfileSummary::new(candidate, candidate_profiles),
        row_alignment: alignment,
        key_match,
        column_mapping,
        scores,
    }
}

/// The all-zero report: no usable key, or a key that paired nothing.
pub(crate) fn zero_report(
    reference: &Table,
    candidate: &Table,
    config: &CompareConfig,
    reference_profiles: &[ColumnProfile],
    candidate_profiles: &[ColumnProfile],
    key_match: KeyMatch,
    alignment: Option<RowAlignment>,
) -> CompareReport {
    let alignment = alignment
        .unwrap_or_else(|| RowAlignment::empty(reference.row_count(), candidate.row_count()));

    let scores = Scores {
        dataset_similarity_equal_weighted: 0.0,
        overall_score_with_coverage: 0.0,
        mapped_reference_columns: 0,
        reference_columns_total: reference.column_count(),
        per_reference_column: reference
            .headers()
            .iter()
            .map(|name| ColumnScore::unmatched(name, Some("no_complete_key_match")))
            .collect(),
    };

    CompareReport {
        status: Status::NoCompleteKeyMatch,
        summary: Summary::new(Status::NoCompleteKeyMatch, &alignment, &key_match, &scores),
        config: ConfigEcho::new(reference, candidate, config),
        reference_profile: TableProfileSummary::new(reference, reference_profiles),
        candidate_profile: TableProfileSummary::new(candidate, candidate_profiles),
        row_alignment: alignment,
        key_match,
        column_mapping: ColumnMapping::unmapped(reference, candidate),
        scores,
    }
}
