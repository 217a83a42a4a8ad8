//! Header tokenization and lexical similarity.
//!
//! Extractor outputs rename columns in predictable ways (`gtin` becomes
//! `gtin_code`, `breadcrumbs` becomes `crumbs`). A frozen alias table maps
//! tokens back to a shared vocabulary before any string distance runs.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::similarity::normalized_levenshtein;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9]+").expect("token regex is valid"));

/// Splits a header into lowercase alphanumeric tokens and applies the alias
/// table. Tokens mapped to the empty string are dropped.
pub fn header_tokens(name: &str) -> Vec<String> {
    let lower = name.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| canon_token(m.as_str()))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

// Frozen: unifies renames observed in extractor output. Empty means the
// token carries no signal and is dropped.
fn canon_token(token: &str) -> &str {
    match token {
        "crumb" => "breadcrumb",
        "crumbs" => "breadcrumbs",
        "tree" => "path",
        "details" => "desc",
        "highlights" => "eyecatchers",
        "badges" => "pills",
        "reviews" => "rating",
        "score" => "value",
        "qty" => "quantity",
        "pack" => "unit",
        "subline" => "subheadline",
        "is" => "has",
        "amt" | "code" | "product" => "",
        other => other,
    }
}

/// Lexical similarity of two headers in `[0, 1]`.
///
/// The better of a character-level signal (normalized Levenshtein over the
/// tokens concatenated without separator) and a word-order-insensitive signal
/// (Jaccard over token sets) wins, so short headers sharing a token are not
/// undervalued by raw edit distance.
pub fn header_similarity(a: &str, b: &str) -> f64 {
    let tokens_a = header_tokens(a);
    let tokens_b = header_tokens(b);

    let concat_a = tokens_a.concat();
    let concat_b = tokens_b.concat();
    if concat_a.is_empty() && concat_b.is_empty() {
        return 1.0;
    }
    let seq = normalized_levenshtein(&concat_a, &concat_b);

    let set_a: HashSet<&str> = tokens_a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = tokens_b.iter().map(String::as_str).collect();
    let jacc = if set_a.is_empty() && set_b.is_empty() {
        1.0
    } else if set_a.is_empty() || set_b.is_empty() {
        0.0
    } else {
        let intersection = set_a.intersection(&set_b).count();
        let union = set_a.union(&set_b).count();
        intersection as f64 / union as f64
    };

    seq.max(jacc)
}
