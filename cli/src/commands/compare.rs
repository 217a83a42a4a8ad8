use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use datascore::{CompareConfig, CompareReport, Status, compare};
use log::{debug, info};

use crate::OutputFormat;
use crate::csv_io::load_table;
use crate::output::{write_json_report, write_text_report};

pub fn run(
    reference_path: &str,
    candidate_path: &str,
    format: OutputFormat,
    output_json: Option<&str>,
    sample_size_mapping: i64,
    quiet: bool,
) -> Result<ExitCode> {
    let reference = load_table(reference_path)?;
    let candidate = load_table(candidate_path)?;
    info!(
        "loaded reference {} ({} rows) and candidate {} ({} rows)",
        reference_path,
        reference.row_count(),
        candidate_path,
        candidate.row_count()
    );

    let config = CompareConfig {
        sample_size_mapping,
    };
    let report = compare(&reference, &candidate, &config).context("Comparison failed")?;
    debug!(
        "key match: {:?} -> {:?} ({})",
        report.key_match.reference_column, report.key_match.candidate_column, report.key_match.reason
    );

    if let Some(path) = output_json {
        let file =
            File::create(path).with_context(|| format!("Failed to create report: {path}"))?;
        let mut writer = BufWriter::new(file);
        write_json_report(&mut writer, &report)
            .with_context(|| format!("Failed to write report: {path}"))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush report: {path}"))?;
        info!("wrote JSON report: {path}");
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match format {
        OutputFormat::Text => write_text_report(&mut handle, &report, quiet)?,
        OutputFormat::Json => write_json_report(&mut handle, &report)?,
    }

    Ok(exit_code_from_status(&report))
}

fn exit_code_from_status(report: &CompareReport) -> ExitCode {
    match report.status {
        Status::Ok => ExitCode::from(0),
        Status::PartialKeyMatch | Status::NoCompleteKeyMatch => ExitCode::from(1),
    }
}
