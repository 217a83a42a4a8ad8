//! Comparison orchestration.

use thiserror::Error;

use crate::column_map::map_columns;
use crate::config::CompareConfig;
use crate::key_match::find_key_match;
use crate::profile::profile_columns;
use crate::report::{self, CompareReport};
use crate::row_align::align_rows_by_key;
use crate::scoring::score_columns;
use crate::table::Table;

/// Internal invariant violations. Data-shaped degradation (no usable key,
/// empty alignment, unmapped columns) is not an error; it is reported
/// through the zero paths of the report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("mapped candidate column {column:?} is not present in the candidate table")]
    MappedColumnMissing { column: String },
}

/// Compares a candidate table against a reference table.
///
/// Runs the full pipeline: profile both tables, discover a shared row key,
/// align rows through it, map columns, score, and assemble the diagnostic
/// report. Short-circuits to the zero report when no usable key exists or
/// when the key pairs no rows.
pub fn compare(
    reference: &Table,
    candidate: &Table,
    config: &CompareConfig,
) -> Result<CompareReport, CompareError> {
    let reference_profiles = profile_columns(reference);
    let candidate_profiles = profile_columns(candidate);

    let key_match = find_key_match(reference, candidate, &reference_profiles, &candidate_profiles);
    if !key_match.found_usable_match {
        return Ok(report::zero_report(
            reference,
            candidate,
            config,
            &reference_profiles,
            &candidate_profiles,
            key_match,
            None,
        ));
    }

    // A usable match always names both key columns.
    let key_columns = key_match
        .reference_column
        .as_deref()
        .and_then(|name| reference.col_index(name))
        .zip(
            key_match
                .candidate_column
                .as_deref()
                .and_then(|name| candidate.col_index(name)),
        );
    let Some((ref_key, cand_key)) = key_columns else {
        return Ok(report::zero_report(
            reference,
            candidate,
            config,
            &reference_profiles,
            &candidate_profiles,
            key_match,
            None,
        ));
    };

    let alignment = align_rows_by_key(reference, candidate, ref_key, cand_key);
    if alignment.matched_rows == 0 {
        return Ok(report::zero_report(
            reference,
            candidate,
            config,
            &reference_profiles,
            &candidate_profiles,
            key_match,
            Some(alignment),
        ));
    }

    let column_mapping = map_columns(
        reference,
        candidate,
        &reference_profiles,
        &candidate_profiles,
        &alignment.pairs,
        config.sample_size(),
    );

    let mut scores = score_columns(reference, candidate, &alignment.pairs, &column_mapping)?;
    scores.overall_score_with_coverage =
        scores.dataset_similarity_equal_weighted * alignment.coverage_reference;

    Ok(report::assemble(
        reference,
        candidate,
        config,
        &reference_profiles,
        &candidate_profiles,
        alignment,
        key_match,
        column_mapping,
        scores,
    ))
}
