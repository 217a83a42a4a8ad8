//! Candidate fixture generator.
//!
//! Rebuilds a reference CSV the way a third-party extractor might return it:
//! columns reordered and slightly renamed, rows reordered, optionally
//! sampled down. The shuffle is seeded so fixtures are reproducible.

use std::collections::HashMap;
use std::process::ExitCode;

use anyhow::Result;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::csv_io::{load_table, write_csv};

// Applied in order as plain substring replacements, mirroring the renames
// observed in real extractor output.
const RENAMES: [(&str, &str); 19] = [
    ("breadcrumbs", "crumbs"),
    ("breadcrumb", "crumb"),
    ("category_path", "category_tree"),
    ("product_is_pharmacy", "is_pharmacy_product"),
    ("rating_count", "reviews_count"),
    ("rating_value", "rating_score"),
    ("price_eur", "price_eur_amt"),
    ("unit_price", "price_per_unit"),
    ("unit_quantity", "pack_qty"),
    ("currency", "currency_code"),
    ("title_subheadline", "title_subline"),
    ("has_", "is_"),
    ("desc_", "details_"),
    ("eyecatchers", "highlights"),
    ("pills", "badges"),
    ("gtin", "gtin_code"),
    ("dan", "dan_code"),
    ("name", "product_name"),
    ("brand", "brand_name"),
];

pub fn run(input: &str, output: &str, seed: u64, sample_rows: usize) -> Result<ExitCode> {
    let table = load_table(input)?;

    let mut rng = StdRng::seed_from_u64(seed);

    let mut column_order: Vec<usize> = (0..table.column_count()).collect();
    column_order.shuffle(&mut rng);

    let mut row_order: Vec<usize> = (0..table.row_count()).collect();
    row_order.shuffle(&mut rng);
    if sample_rows > 0 && sample_rows < row_order.len() {
        row_order.truncate(sample_rows);
    }

    let shuffled_headers: Vec<&String> =
        column_order.iter().map(|&c| &table.headers()[c]).collect();
    let renamed_headers = build_unique_names(&shuffled_headers);

    let rows: Vec<Vec<String>> = row_order
        .iter()
        .map(|&r| {
            column_order
                .iter()
                .map(|&c| table.cell(r, c).to_string())
                .collect()
        })
        .collect();

    write_csv(output, &renamed_headers, &rows)?;

    info!(
        "shuffled {} -> {} (seed {}, {} rows, {} cols)",
        input,
        output,
        seed,
        rows.len(),
        renamed_headers.len()
    );
    println!("Input:  {input}");
    println!("Output: {output}");
    println!("Seed:   {seed}");
    println!("Rows:   {}", rows.len());
    println!("Cols:   {}", renamed_headers.len());
    println!("Column mapping (first 10 in output order):");
    for (original, renamed) in shuffled_headers.iter().zip(&renamed_headers).take(10) {
        println!("  {original} -> {renamed}");
    }

    Ok(ExitCode::from(0))
}

fn slight_rename(column: &str) -> String {
    let mut out = column.to_string();
    for (from, to) in RENAMES {
        out = out.replace(from, to);
    }
    out
}

/// Renames columns, disambiguating collisions with a numeric suffix.
fn build_unique_names(columns: &[&String]) -> Vec<String> {
    let mut used: HashMap<String, usize> = HashMap::new();
    columns
        .iter()
        .map(|column| {
            let mut renamed = slight_rename(column);
            match used.get_mut(&renamed) {
                Some(count) => {
                    *count += 1;
                    renamed = format!("{renamed}_{count}");
                }
                None => {
                    used.insert(renamed.clone(), 1);
                }
            }
            renamed
        })
        .collect()
}
