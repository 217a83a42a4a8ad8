//! Column mapping.
//!
//! Every (reference column, candidate column) pair is scored on three
//! signals: header lexical similarity, datatype profile compatibility, and
//! exact-value agreement over a sample of aligned rows. A greedy one-to-one
//! pass admits pairs in confidence order.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::header::header_similarity;
use crate::normalize::{canonical_scalar, is_empty};
use crate::profile::ColumnProfile;
use crate::report::round6;
use crate::similarity::type_compatibility;
use crate::table::Table;

const HEADER_WEIGHT: f64 = 0.35;
const TYPE_WEIGHT: f64 = 0.10;
const SAMPLE_WEIGHT: f64 = 0.55;

/// A pair is admitted when its confidence clears this floor...
const CONFIDENCE_ADMIT_MIN: f64 = 0.55;
/// ...or when the aligned samples agree this strongly despite a weak header.
const SAMPLE_ADMIT_MIN: f64 = 0.85;

/// Exact canonical agreement dominates the sample score; the presence
/// pattern keeps sparse text columns from scoring zero.
const SAMPLE_EXACT_WEIGHT: f64 = 0.85;
const SAMPLE_PRESENCE_WEIGHT: f64 = 0.15;

/// Pair candidates retained in the report.
const TOP_PAIR_CANDIDATES: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingPair {
    pub reference_column: String,
    pub candidate_column: String,
    pub header_similarity: f64,
    pub type_compatibility: f64,
    pub sample_similarity: f64,
    pub mapping_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMapping {
    /// Admitted pairs keyed by reference column.
    pub mapping: BTreeMap<String, MappingPair>,
    pub reference_unmatched: Vec<String>,
    pub candidate_unmatched: Vec<String>,
    pub mapping_confidence_avg: f64,
    pub pair_candidates_top: Vec<MappingPair>,
}

impl ColumnMapping {
    /// The empty mapping used when no usable key exists.
    pub(crate) fn unmapped(reference: &Table, candidate: &Table) -> ColumnMapping {
        ColumnMapping {
            mapping: BTreeMap::new(),
            reference_unmatched: reference.headers().to_vec(),
            candidate_unmatched: candidate.headers().to_vec(),
            mapping_confidence_avg: 0.0,
            pair_candidates_top: Vec::new(),
        }
    }
}

/// Scores the full pair matrix and greedily admits a one-to-one mapping.
pub fn map_columns(
    reference: &Table,
    candidate: &Table,
    reference_profiles: &[ColumnProfile],
    candidate_profiles: &[ColumnProfile],
    aligned_pairs: &[(usize, usize)],
    sample_size: usize,
) -> ColumnMapping {
    let sample_pairs = &aligned_pairs[..sample_size.min(aligned_pairs.len())];

    let mut all_pairs: Vec<ScoredPair> =
        Vec::with_capacity(reference.column_count() * candidate.column_count());
    for ref_col in 0..reference.column_count() {
        for cand_col in 0..candidate.column_count() {
            let header = header_similarity(
                &reference.headers()[ref_col],
                &candidate.headers()[cand_col],
            );
            let type_score = type_compatibility(
                &reference_profiles[ref_col],
                &candidate_profiles[cand_col],
            );
            let sample =
                sample_column_similarity(reference, candidate, sample_pairs, ref_col, cand_col);
            let confidence =
                HEADER_WEIGHT * header + TYPE_WEIGHT * type_score + SAMPLE_WEIGHT * sample;

            all_pairs.push(ScoredPair {
                ref_col,
                cand_col,
                pair: MappingPair {
                    reference_column: reference.headers()[ref_col].clone(),
                    candidate_column: candidate.headers()[cand_col].clone(),
                    header_similarity: round6(header),
                    type_compatibility: round6(type_score),
                    sample_similarity: round6(sample),
                    mapping_confidence: round6(confidence),
                },
            });
        }
    }

    // Stable sort on the rounded triple: ties fall back to reference-major
    // enumeration order, keeping the greedy pass deterministic.
    all_pairs.sort_by(|a, b| {
        b.pair
            .mapping_confidence
            .total_cmp(&a.pair.mapping_confidence)
            .then_with(|| {
                b.pair
                    .sample_similarity
                    .total_cmp(&a.pair.sample_similarity)
            })
            .then_with(|| {
                b.pair
                    .header_similarity
                    .total_cmp(&a.pair.header_similarity)
            })
    });

    let mut used_ref: HashSet<usize> = HashSet::new();
    let mut used_cand: HashSet<usize> = HashSet::new();
    let mut mapping: BTreeMap<String, MappingPair> = BTreeMap::new();
    let mut confidence_sum = 0.0;

    for scored in &all_pairs {
        if used_ref.contains(&scored.ref_col) || used_cand.contains(&scored.cand_col) {
            continue;
        }
        if scored.pair.mapping_confidence < CONFIDENCE_ADMIT_MIN
            && scored.pair.sample_similarity < SAMPLE_ADMIT_MIN
        {
            continue;
        }
        used_ref.insert(scored.ref_col);
        used_cand.insert(scored.cand_col);
        confidence_sum += scored.pair.mapping_confidence;
        mapping.insert(scored.pair.reference_column.clone(), scored.pair.clone());
    }

    let reference_unmatched = unmatched_headers(reference, &used_ref);
    let candidate_unmatched = unmatched_headers(candidate, &used_cand);
    let mapping_confidence_avg = if mapping.is_empty() {
        0.0
    } else {
        round6(confidence_sum / mapping.len() as f64)
    };

    let mut pair_candidates_top: Vec<MappingPair> =
        all_pairs.into_iter().map(|s| s.pair).collect();
    pair_candidates_top.truncate(TOP_PAIR_CANDIDATES);

    ColumnMapping {
        mapping,
        reference_unmatched,
        candidate_unmatched,
        mapping_confidence_avg,
        pair_candidates_top,
    }
}

struct ScoredPair {
    ref_col: usize,
    cand_col: usize,
    pair: MappingPair,
}

/// Mean agreement of two columns over the sampled aligned rows: exact
/// canonical matches weighted against matching presence. An empty sample
/// scores zero.
fn sample_column_similarity(
    reference: &Table,
    candidate: &Table,
    sample_pairs: &[(usize, usize)],
    ref_col: usize,
    cand_col: usize,
) -> f64 {
    if sample_pairs.is_empty() {
        return 0.0;
    }

    let mut exact = 0usize;
    let mut same_presence = 0usize;
    for &(ref_idx, cand_idx) in sample_pairs {
        let ref_value = reference.cell(ref_idx, ref_col);
        let cand_value = candidate.cell(cand_idx, cand_col);
        if is_empty(ref_value) == is_empty(cand_value) {
            same_presence += 1;
        }
        if canonical_scalar(ref_value) == canonical_scalar(cand_value) {
            exact += 1;
        }
    }

    let n = sample_pairs.len() as f64;
    SAMPLE_EXACT_WEIGHT * (exact as f64 / n) + SAMPLE_PRESENCE_WEIGHT * (same_presence as f64 / n)
}

fn unmatched_headers(table: &Table, used: &HashSet<usize>) -> Vec<String> {
    table
        .headers()
        .iter()
        .enumerate()
        .filter(|(idx, _)| !used.contains(idx))
        .map(|(_, name)| name.clone())
        .collect()
}
