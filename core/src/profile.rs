//! Column profiling.
//!
//! Profiles are computed once per table and reused by key discovery and
//! column mapping, so each column is scanned a single time.

use std::collections::HashSet;

use crate::header::header_tokens;
use crate::normalize::{canonical_scalar, is_decimal_like, is_empty, normalize_text, parse_bool};
use crate::table::Table;

/// Sample statistics run over at most this many leading non-empty values.
pub(crate) const PROFILE_SAMPLE_LIMIT: usize = 500;

/// Per-column statistics over one table.
///
/// Invariants: `null_count + non_empty_count == row_count` and
/// `unique_non_empty_count <= non_empty_count`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnProfile {
    pub row_count: usize,
    pub non_empty_count: usize,
    pub null_count: usize,
    pub unique_non_empty_count: usize,
    /// True iff the column has at least one non-empty value and all
    /// non-empty canonical values are distinct.
    pub is_unique_non_empty: bool,
    pub uniqueness_ratio_non_empty: f64,
    pub numeric_ratio: f64,
    pub bool_ratio: f64,
    pub avg_len_sample: f64,
    pub max_len_sample: usize,
    pub header_tokens: Vec<String>,
}

/// Profiles every column of a table, in header order.
pub fn profile_columns(table: &Table) -> Vec<ColumnProfile> {
    let row_count = table.row_count();
    (0..table.column_count())
        .map(|col| {
            let mut non_empty_count = 0usize;
            let mut canon_set: HashSet<String> = HashSet::new();

            let mut sampled = 0usize;
            let mut numeric_hits = 0usize;
            let mut bool_hits = 0usize;
            let mut total_len = 0usize;
            let mut max_len = 0usize;

            for value in table.column_values(col) {
                if is_empty(value) {
                    continue;
                }
                non_empty_count += 1;
                canon_set.insert(canonical_scalar(value));

                if sampled < PROFILE_SAMPLE_LIMIT {
                    sampled += 1;
                    if is_decimal_like(value) {
                        numeric_hits += 1;
                    }
                    if parse_bool(value).is_some() {
                        bool_hits += 1;
                    }
                    let len = normalize_text(value).chars().count();
                    total_len += len;
                    max_len = max_len.max(len);
                }
            }

            let unique_non_empty_count = canon_set.len();
            ColumnProfile {
                row_count,
                non_empty_count,
                null_count: row_count - non_empty_count,
                unique_non_empty_count,
                is_unique_non_empty: non_empty_count > 0
                    && unique_non_empty_count == non_empty_count,
                uniqueness_ratio_non_empty: if non_empty_count > 0 {
                    unique_non_empty_count as f64 / non_empty_count as f64
                } else {
                    0.0
                },
                numeric_ratio: ratio(numeric_hits, sampled),
                bool_ratio: ratio(bool_hits, sampled),
                avg_len_sample: if sampled > 0 {
                    total_len as f64 / sampled as f64
                } else {
                    0.0
                },
                max_len_sample: max_len,
                header_tokens: header_tokens(&table.headers()[col]),
            }
        })
        .collect()
}

fn ratio(hits: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
