use std::io::Write;

use anyhow::Result;
use datascore::CompareReport;
use serde_json::to_writer_pretty;

pub fn write_json_report<W: Write>(w: &mut W, report: &CompareReport) -> Result<()> {
    to_writer_pretty(&mut *w, report)?;
    writeln!(w)?;
    Ok(())
}

pub fn write_text_report<W: Write>(w: &mut W, report: &CompareReport, quiet: bool) -> Result<()> {
    let summary = &report.summary;

    writeln!(w, "Status: {}", report.status)?;
    writeln!(
        w,
        "Overall score with coverage: {:.12}",
        summary.overall_score_with_coverage
    )?;
    if quiet {
        return Ok(());
    }

    match (&summary.key_reference_column, &summary.key_candidate_column) {
        (Some(ref_key), Some(cand_key)) => {
            let mode = summary
                .key_match_mode
                .map(|m| format!("{m:?}").to_lowercase())
                .unwrap_or_default();
            writeln!(w, "Key: {ref_key} -> {cand_key} ({mode})")?;
        }
        _ => writeln!(w, "Key: none ({})", report.key_match.reason)?,
    }

    writeln!(
        w,
        "Rows: {} reference / {} candidate, {} matched",
        summary.reference_rows, summary.candidate_rows, summary.matched_rows
    )?;
    writeln!(
        w,
        "Coverage: reference {:.6}, candidate {:.6}",
        summary.coverage_reference, summary.coverage_candidate
    )?;
    writeln!(
        w,
        "Columns mapped: {}/{}",
        summary.mapped_reference_columns, summary.reference_columns_total
    )?;
    writeln!(
        w,
        "Dataset similarity (equal weighted): {:.12}",
        summary.dataset_similarity_equal_weighted
    )?;

    write_unmatched(w, "Unmatched reference columns", &report.column_mapping.reference_unmatched)?;
    write_unmatched(w, "Unmatched candidate columns", &report.column_mapping.candidate_unmatched)?;

    Ok(())
}

fn write_unmatched<W: Write>(w: &mut W, label: &str, columns: &[String]) -> Result<()> {
    if columns.is_empty() {
        writeln!(w, "{label}: (none)")?;
    } else {
        writeln!(w, "{label}: {}", columns.join(", "))?;
    }
    Ok(())
}
