//! Dataset scoring.
//!
//! Each mapped reference column is scored as the mean value similarity over
//! all aligned row pairs; unmapped reference columns contribute zero. The
//! dataset score is the equal-weighted mean over every reference column.

use serde::Serialize;

use crate::column_map::ColumnMapping;
use crate::engine::CompareError;
use crate::report::round6;
use crate::similarity::value_similarity;
use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnScore {
    pub reference_column: String,
    pub candidate_column: Option<String>,
    pub similarity: f64,
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count_scored: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_similarity: Option<f64>,
}

impl ColumnScore {
    pub(crate) fn unmatched(reference_column: &str, reason: Option<&str>) -> ColumnScore {
        ColumnScore {
            reference_column: reference_column.to_string(),
            candidate_column: None,
            similarity: 0.0,
            matched: false,
            reason: reason.map(str::to_string),
            mapping_confidence: None,
            row_count_scored: None,
            header_similarity: None,
            sample_similarity: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scores {
    /// Equal-weighted mean over all reference columns; full precision.
    pub dataset_similarity_equal_weighted: f64,
    /// Dataset similarity discounted by reference coverage; full precision.
    pub overall_score_with_coverage: f64,
    pub mapped_reference_columns: usize,
    pub reference_columns_total: usize,
    pub per_reference_column: Vec<ColumnScore>,
}

/// Scores every reference column over the full aligned pair list.
///
/// Fails only on a broken mapping invariant: a mapped candidate column that
/// does not exist in the candidate table.
pub fn score_columns(
    reference: &Table,
    candidate: &Table,
    aligned_pairs: &[(usize, usize)],
    mapping: &ColumnMapping,
) -> Result<Scores, CompareError> {
    let mut per_column: Vec<ColumnScore> = Vec::with_capacity(reference.column_count());
    let mut total = 0.0;
    let mut mapped = 0usize;

    for (ref_col, ref_name) in reference.headers().iter().enumerate() {
        let Some(pair) = mapping.mapping.get(ref_name) else {
            per_column.push(ColumnScore::unmatched(ref_name, None));
            continue;
        };
        let cand_col = candidate.col_index(&pair.candidate_column).ok_or_else(|| {
            CompareError::MappedColumnMissing {
                column: pair.candidate_column.clone(),
            }
        })?;

        let similarity = full_column_similarity(reference, candidate, aligned_pairs, ref_col, cand_col);
        total += similarity;
        mapped += 1;
        per_column.push(ColumnScore {
            reference_column: ref_name.clone(),
            candidate_column: Some(pair.candidate_column.clone()),
            similarity: round6(similarity),
            matched: true,
            reason: None,
            mapping_confidence: Some(pair.mapping_confidence),
            row_count_scored: Some(aligned_pairs.len()),
            header_similarity: Some(pair.header_similarity),
            sample_similarity: Some(pair.sample_similarity),
        });
    }

    let columns_total = reference.column_count();
    let dataset = if columns_total == 0 {
        0.0
    } else {
        total / columns_total as f64
    };

    Ok(Scores {
        dataset_similarity_equal_weighted: dataset,
        overall_score_with_coverage: 0.0,
        mapped_reference_columns: mapped,
        reference_columns_total: columns_total,
        per_reference_column: per_column,
    })
}

fn full_column_similarity(
    reference: &Table,
    candidate: &Table,
    aligned_pairs: &[(usize, usize)],
    ref_col: usize,
    cand_col: usize,
) -> f64 {
    if aligned_pairs.is_empty() {
        return 0.0;
    }
    let total: f64 = aligned_pairs
        .iter()
        .map(|&(ref_idx, cand_idx)| {
            value_similarity(reference.cell(ref_idx, ref_col), candidate.cell(cand_idx, cand_col))
        })
        .sum();
    total / aligned_pairs.len() as f64
}
