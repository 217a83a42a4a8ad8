//! CSV loading and writing.
//!
//! Extractor output arrives with a UTF-8 BOM and CRLF line endings, and
//! occasionally with ragged records; the loader tolerates all of that and
//! the writer reproduces it so round-tripped fixtures stay byte-compatible
//! with the upstream tooling.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use datascore::Table;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

pub fn load_table(path: &str) -> Result<Table> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read CSV: {path}"))?;
    let bytes = strip_bom(&bytes);

    let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes);
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to parse CSV header: {path}"))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Failed to parse CSV record: {path}"))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Table::new(path, headers, rows).with_context(|| format!("Invalid table: {path}"))
}

pub fn write_csv(path: &str, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for {path}"))?;
        }
    }

    let mut file =
        fs::File::create(path).with_context(|| format!("Failed to create CSV: {path}"))?;
    file.write_all(&UTF8_BOM)
        .with_context(|| format!("Failed to write BOM: {path}"))?;

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(file);
    writer
        .write_record(headers)
        .with_context(|| format!("Failed to write CSV header: {path}"))?;
    for row in rows {
        writer
            .write_record(row)
            .with_context(|| format!("Failed to write CSV record: {path}"))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV: {path}"))?;
    Ok(())
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM.as_slice()).unwrap_or(bytes)
}
