//! Row-key discovery.
//!
//! Finds the (reference column, candidate column) pair whose non-empty
//! canonical values best act as a shared row key. Only columns that are
//! unique over their non-empty canonical values qualify on either side.

use std::collections::HashSet;

use serde::Serialize;

use crate::header::header_similarity;
use crate::normalize::{canonical_scalar, is_empty};
use crate::profile::ColumnProfile;
use crate::report::round6;
use crate::table::Table;

/// A complete set match beats any partial overlap regardless of coverage.
const COMPLETE_MATCH_BONUS: f64 = 10.0;
/// Candidate coverage is weighted above reference coverage: a candidate that
/// is fully explained by the reference is expected even when the candidate
/// covers only part of the reference.
const CANDIDATE_COVERAGE_WEIGHT: f64 = 2.0;
/// Candidates retained in the report.
const TOP_KEY_CANDIDATES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyCandidate {
    pub reference_column: String,
    pub candidate_column: String,
    pub complete_set_match: bool,
    pub intersection_count: usize,
    pub candidate_key_coverage: f64,
    pub reference_key_coverage: f64,
    pub header_similarity: f64,
    pub reference_non_empty_count: usize,
    pub candidate_non_empty_count: usize,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    Complete,
    Partial,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMatch {
    pub found_usable_match: bool,
    pub found_complete_match: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<MatchMode>,
    pub reference_column: Option<String>,
    pub candidate_column: Option<String>,
    pub reason: String,
    pub candidates: Vec<KeyCandidate>,
}

impl KeyMatch {
    fn none_found() -> KeyMatch {
        KeyMatch {
            found_usable_match: false,
            found_complete_match: false,
            match_mode: None,
            reference_column: None,
            candidate_column: None,
            reason: "no_exact_or_partial_unique_key_match".to_string(),
            candidates: Vec::new(),
        }
    }
}

/// Ranks all admissible key pairs and reports the winner plus the top
/// candidates for diagnostics.
pub fn find_key_match(
    reference: &Table,
    candidate: &Table,
    reference_profiles: &[ColumnProfile],
    candidate_profiles: &[ColumnProfile],
) -> KeyMatch {
    let unique_cand_columns: Vec<Option<ColumnKeyValues>> = (0..candidate.column_count())
        .map(|col| {
            candidate_profiles[col]
                .is_unique_non_empty
                .then(|| ColumnKeyValues::collect(candidate, col))
        })
        .collect();

    let mut candidates: Vec<KeyCandidate> = Vec::new();
    for ref_col in 0..reference.column_count() {
        if !reference_profiles[ref_col].is_unique_non_empty {
            continue;
        }
        let ref_values = ColumnKeyValues::collect(reference, ref_col);

        for (cand_col, entry) in unique_cand_columns.iter().enumerate() {
            let Some(cand_values) = entry else {
                continue;
            };

            let intersection = ref_values
                .set
                .intersection(&cand_values.set)
                .count();
            if intersection == 0 {
                continue;
            }

            let complete = reference.row_count() == candidate.row_count()
                && ref_values.count == cand_values.count
                && ref_values.set == cand_values.set;
            let cand_coverage = intersection as f64 / cand_values.set.len().max(1) as f64;
            let ref_coverage = intersection as f64 / ref_values.set.len().max(1) as f64;
            let header_score =
                header_similarity(&reference.headers()[ref_col], &candidate.headers()[cand_col]);
            let score = if complete { COMPLETE_MATCH_BONUS } else { 0.0 }
                + cand_coverage * CANDIDATE_COVERAGE_WEIGHT
                + ref_coverage
                + header_score;

            candidates.push(KeyCandidate {
                reference_column: reference.headers()[ref_col].clone(),
                candidate_column: candidate.headers()[cand_col].clone(),
                complete_set_match: complete,
                intersection_count: intersection,
                candidate_key_coverage: round6(cand_coverage),
                reference_key_coverage: round6(ref_coverage),
                header_similarity: round6(header_score),
                reference_non_empty_count: ref_values.count,
                candidate_non_empty_count: cand_values.count,
                score,
            });
        }
    }

    if candidates.is_empty() {
        return KeyMatch::none_found();
    }

    // Stable sort: remaining ties keep reference-major enumeration order, so
    // the ranking is identical regardless of platform or evaluation order.
    candidates.sort_by(|a, b| {
        b.score.total_cmp(&a.score).then_with(|| {
            b.reference_non_empty_count
                .cmp(&a.reference_non_empty_count)
        })
    });
    candidates.truncate(TOP_KEY_CANDIDATES);
    for entry in &mut candidates {
        entry.score = round6(entry.score);
    }

    let best = &candidates[0];
    let (mode, reason) = if best.complete_set_match {
        (MatchMode::Complete, "exact_unique_key_set_match")
    } else {
        (MatchMode::Partial, "partial_unique_key_overlap_match")
    };

    KeyMatch {
        found_usable_match: best.intersection_count > 0,
        found_complete_match: best.complete_set_match,
        match_mode: Some(mode),
        reference_column: Some(best.reference_column.clone()),
        candidate_column: Some(best.candidate_column.clone()),
        reason: reason.to_string(),
        candidates,
    }
}

struct ColumnKeyValues {
    count: usize,
    set: HashSet<String>,
}

impl ColumnKeyValues {
    fn collect(table: &Table, col: usize) -> ColumnKeyValues {
        let mut count = 0usize;
        let mut set = HashSet::new();
        for value in table.column_values(col) {
            if is_empty(value) {
                continue;
            }
            count += 1;
            set.insert(canonical_scalar(value));
        }
        ColumnKeyValues { count, set }
    }
}
