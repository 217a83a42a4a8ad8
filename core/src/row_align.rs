//! Keyed row alignment.
//!
//! Once a key pair is chosen, alignment is a deterministic two-pass sweep:
//! index the reference by canonical key (first occurrence wins), then walk
//! the candidate in order, pairing each row with an unclaimed reference row.
//! The resulting pair list is the single source of truth for which candidate
//! row explains which reference row.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::normalize::canonical_scalar;
use crate::report::round6;
use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowAlignment {
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_key: Option<String>,
    pub matched_rows: usize,
    pub reference_rows: usize,
    pub candidate_rows: usize,
    pub coverage_reference: f64,
    pub coverage_candidate: f64,
    pub duplicate_reference_keys: usize,
    pub duplicate_candidate_matches: usize,
    pub missing_candidate_keys_or_unmatched: usize,
    /// Ordered (reference row, candidate row) pairs; internal only.
    #[serde(skip)]
    pub pairs: Vec<(usize, usize)>,
}

impl RowAlignment {
    /// The empty alignment used when no usable key exists.
    pub(crate) fn empty(reference_rows: usize, candidate_rows: usize) -> RowAlignment {
        RowAlignment {
            complete: false,
            reference_key: None,
            candidate_key: None,
            matched_rows: 0,
            reference_rows,
            candidate_rows,
            coverage_reference: 0.0,
            coverage_candidate: 0.0,
            duplicate_reference_keys: 0,
            duplicate_candidate_matches: 0,
            missing_candidate_keys_or_unmatched: 0,
            pairs: Vec::new(),
        }
    }
}

/// Aligns candidate rows to reference rows through the chosen key columns.
pub fn align_rows_by_key(
    reference: &Table,
    candidate: &Table,
    ref_key: usize,
    cand_key: usize,
) -> RowAlignment {
    let mut ref_index: HashMap<String, usize> = HashMap::with_capacity(reference.row_count());
    let mut duplicate_reference_keys = 0usize;
    for (idx, value) in reference.column_values(ref_key).enumerate() {
        let key = canonical_scalar(value);
        if key.is_empty() {
            continue;
        }
        if ref_index.contains_key(&key) {
            duplicate_reference_keys += 1;
            continue;
        }
        ref_index.insert(key, idx);
    }

    let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(candidate.row_count());
    let mut claimed_ref_rows: HashSet<usize> = HashSet::with_capacity(candidate.row_count());
    let mut missing = 0usize;
    let mut duplicate_candidate_matches = 0usize;

    for (cand_idx, value) in candidate.column_values(cand_key).enumerate() {
        let key = canonical_scalar(value);
        if key.is_empty() {
            missing += 1;
            continue;
        }
        let Some(&ref_idx) = ref_index.get(&key) else {
            missing += 1;
            continue;
        };
        if !claimed_ref_rows.insert(ref_idx) {
            duplicate_candidate_matches += 1;
            continue;
        }
        pairs.push((ref_idx, cand_idx));
    }

    pairs.sort_unstable_by_key(|&(ref_idx, _)| ref_idx);

    let matched = pairs.len();
    let reference_rows = reference.row_count();
    let candidate_rows = candidate.row_count();
    let complete = duplicate_reference_keys == 0
        && duplicate_candidate_matches == 0
        && missing == 0
        && matched == reference_rows
        && matched == candidate_rows;

    RowAlignment {
        complete,
        reference_key: Some(reference.headers()[ref_key].clone()),
        candidate_key: Some(candidate.headers()[cand_key].clone()),
        matched_rows: matched,
        reference_rows,
        candidate_rows,
        coverage_reference: round6(safe_ratio(matched, reference_rows)),
        coverage_candidate: round6(safe_ratio(matched, candidate_rows)),
        duplicate_reference_keys,
        duplicate_candidate_matches,
        missing_candidate_keys_or_unmatched: missing,
        pairs,
    }
}

fn safe_ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
