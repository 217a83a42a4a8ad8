//! Shared fixtures: deterministic product tables in the shape produced by
//! the upstream extractor, 41 columns wide. Only `gtin` and `dan` carry
//! unique values; every other column repeats somewhere in a 500-row table.

#![allow(dead_code)]

use datascore::Table;

pub const REFERENCE_ROWS: usize = 500;

const COLORS: [&str; 8] = [
    "red", "blue", "green", "black", "white", "amber", "teal", "ivory",
];
const SIZES: [&str; 5] = ["XS", "S", "M", "L", "XL"];
const COUNTRIES: [&str; 6] = ["DE", "FR", "IT", "PL", "NL", "ES"];

pub fn reference_headers() -> Vec<&'static str> {
    vec![
        "gtin",
        "dan",
        "name",
        "brand",
        "category_path",
        "breadcrumbs",
        "price_eur",
        "unit_price",
        "unit_quantity",
        "currency",
        "rating_value",
        "rating_count",
        "title_subheadline",
        "description",
        "desc_short",
        "desc_long",
        "eyecatchers",
        "pills",
        "has_variants",
        "has_subscription",
        "is_available",
        "product_is_pharmacy",
        "image_url",
        "thumbnail_url",
        "product_url",
        "seller_name",
        "shipping_cost",
        "shipping_time",
        "stock_status",
        "ean",
        "sku",
        "color",
        "size",
        "weight_grams",
        "volume_ml",
        "ingredients",
        "usage_instructions",
        "warnings",
        "country_of_origin",
        "manufacturer",
        "release_date",
    ]
}

/// Deterministic cell value for a reference column and row.
pub fn cell_value(column: &str, i: usize) -> String {
    match column {
        "gtin" => format!("{}", 4_000_000_000_000u64 + i as u64),
        "dan" => format!("{}", 700_000 + i),
        "name" => format!("Product {}", i % 250),
        "brand" => format!("Brand {}", i % 7),
        "category_path" => format!("Home/Care/Section {}", i % 5),
        "breadcrumbs" => format!("Home > Care > Section {}", i % 5),
        "price_eur" => format!("{}.99", 1 + i % 50),
        "unit_price" => format!("{}.50", 1 + i % 30),
        "unit_quantity" => format!("{}", 1 + i % 12),
        "currency" => "EUR".to_string(),
        "rating_value" => format!("{}.{}", 1 + i % 4, (i % 2) * 5),
        "rating_count" => format!("{}", (i * 13) % 200),
        "title_subheadline" => format!("Top choice {}", i % 6),
        "description" => {
            if i % 10 == 0 {
                String::new()
            } else {
                format!("Long form description for item group {}", i % 50)
            }
        }
        "desc_short" => format!("Short copy {}", i % 20),
        "desc_long" => format!("Extended copy block {}", i % 15),
        "eyecatchers" => {
            if i % 3 == 0 {
                "New".to_string()
            } else {
                String::new()
            }
        }
        "pills" => {
            if i % 4 == 0 {
                "Vegan|Organic".to_string()
            } else {
                "Standard".to_string()
            }
        }
        "has_variants" => bool_cell(i % 2 == 0),
        "has_subscription" => bool_cell(i % 5 == 0),
        "is_available" => bool_cell(i % 97 != 0),
        "product_is_pharmacy" => bool_cell(i % 11 == 0),
        "image_url" => format!("https://img.example.com/p/{}.jpg", i % 100),
        "thumbnail_url" => format!("https://img.example.com/p/{}_t.jpg", i % 100),
        "product_url" => format!("https://shop.example.com/item/{}", i % 125),
        "seller_name" => format!("Seller {}", i % 9),
        "shipping_cost" => format!("{}.95", 4 + i % 3),
        "shipping_time" => format!("{} days", 1 + i % 5),
        "stock_status" => ["in_stock", "low_stock", "out_of_stock"][i % 3].to_string(),
        "ean" => format!("42{:011}", i % 150),
        "sku" => format!("SKU-{:04}", i % 200),
        "color" => COLORS[i % COLORS.len()].to_string(),
        "size" => SIZES[i % SIZES.len()].to_string(),
        "weight_grams" => format!("{}", (i % 40) * 25 + 100),
        "volume_ml" => format!("{}", (i % 12) * 50 + 50),
        "ingredients" => format!("aqua, glycerin, extract {}", i % 10),
        "usage_instructions" => format!("Apply daily, routine {}", i % 5),
        "warnings" => {
            if i % 7 == 0 {
                format!("Keep out of reach, class {}", i % 3)
            } else {
                String::new()
            }
        }
        "country_of_origin" => COUNTRIES[i % COUNTRIES.len()].to_string(),
        "manufacturer" => format!("Manufacturer {}", i % 13),
        "release_date" => format!("2025-{:02}-{:02}", 1 + i % 12, 1 + i % 28),
        other => panic!("unknown fixture column {other:?}"),
    }
}

fn bool_cell(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

/// The header renames applied by the upstream candidate generator, in
/// application order (sequential substring replacement).
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

pub fn candidate_header(reference_header: &str) -> String {
    let mut out = reference_header.to_string();
    for (from, to) in RENAMES {
        out = out.replace(from, to);
    }
    out
}

pub fn reference_table(rows: usize) -> Table {
    let headers = reference_headers();
    let data = (0..rows)
        .map(|i| headers.iter().map(|h| cell_value(h, i)).collect())
        .collect();
    Table::new(
        "sample_products_reference.csv",
        headers.into_iter().map(str::to_string).collect(),
        data,
    )
    .expect("reference fixture is valid")
}

/// Candidate table: same logical rows as the reference, with columns
/// reversed and renamed and rows visited in a stride-7 permutation.
pub fn candidate_table(rows: usize) -> Table {
    candidate_table_edited(rows, |_, _, value| value)
}

/// As [`candidate_table`], with a per-cell edit hook receiving the
/// *reference* column name and row index.
pub fn candidate_table_edited(
    rows: usize,
    edit: impl Fn(&str, usize, String) -> String,
) -> Table {
    let ref_headers = reference_headers();
    let shuffled: Vec<&str> = ref_headers.iter().rev().copied().collect();

    let headers: Vec<String> = shuffled.iter().map(|h| candidate_header(h)).collect();
    let data: Vec<Vec<String>> = row_permutation(rows)
        .into_iter()
        .map(|i| {
            shuffled
                .iter()
                .map(|h| edit(h, i, cell_value(h, i)))
                .collect()
        })
        .collect();

    Table::new("sample_products_candidate1.csv", headers, data)
        .expect("candidate fixture is valid")
}

/// Candidate with one reference column dropped entirely.
pub fn candidate_table_without(rows: usize, dropped_reference_column: &str) -> Table {
    let ref_headers: Vec<&str> = reference_headers()
        .into_iter()
        .filter(|h| *h != dropped_reference_column)
        .collect();
    let shuffled: Vec<&str> = ref_headers.iter().rev().copied().collect();

    let headers: Vec<String> = shuffled.iter().map(|h| candidate_header(h)).collect();
    let data: Vec<Vec<String>> = row_permutation(rows)
        .into_iter()
        .map(|i| shuffled.iter().map(|h| cell_value(h, i)).collect())
        .collect();

    Table::new("sample_products_candidate_dropped.csv", headers, data)
        .expect("candidate fixture is valid")
}

/// Candidate with one extra synthetic column appended.
pub fn candidate_table_with_extra(rows: usize, extra_header: &str) -> Table {
    let ref_headers = reference_headers();
    let shuffled: Vec<&str> = ref_headers.iter().rev().copied().collect();

    let mut headers: Vec<String> = shuffled.iter().map(|h| candidate_header(h)).collect();
    headers.push(extra_header.to_string());
    let data: Vec<Vec<String>> = row_permutation(rows)
        .into_iter()
        .map(|i| {
            let mut row: Vec<String> = shuffled.iter().map(|h| cell_value(h, i)).collect();
            row.push(format!("noise_{i:03}"));
            row
        })
        .collect();

    Table::new("sample_products_candidate_extra.csv", headers, data)
        .expect("candidate fixture is valid")
}

// Stride permutation; 7 is coprime to both 500 and 100, so every fixture
// size used by the tests gets a genuine bijection.
fn row_permutation(rows: usize) -> Vec<usize> {
    (0..rows).map(|j| (j * 7) % rows).collect()
}
