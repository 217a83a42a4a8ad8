//! Cell canonicalization.
//!
//! Every comparison stage works on canonical scalars rather than raw cell
//! text, so format noise (`+20.85` vs `20.8500`, `Yes` vs `1`) collapses
//! before any edit distance is computed. The canonical form doubles as the
//! equality key for set-based operations (key discovery, column sampling).

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

static DECIMAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)$").expect("decimal regex is valid")
});

/// True iff the cell is empty or whitespace-only.
pub fn is_empty(value: &str) -> bool {
    value.trim().is_empty()
}

/// Trims leading and trailing whitespace.
pub fn normalize_text(value: &str) -> &str {
    value.trim()
}

/// Case-insensitive boolean parse over the trimmed text.
pub fn parse_bool(value: &str) -> Option<bool> {
    let s = normalize_text(value);
    const TRUE: [&str; 4] = ["true", "1", "yes", "y"];
    const FALSE: [&str; 4] = ["false", "0", "no", "n"];
    if TRUE.iter().any(|t| s.eq_ignore_ascii_case(t)) {
        return Some(true);
    }
    if FALSE.iter().any(|f| s.eq_ignore_ascii_case(f)) {
        return Some(false);
    }
    None
}

/// True iff the trimmed text matches the decimal grammar `[+-]?(\d+\.?\d*|\.\d+)`.
pub fn is_decimal_like(value: &str) -> bool {
    let s = normalize_text(value);
    !s.is_empty() && DECIMAL_RE.is_match(s)
}

/// Parses the cell as an exact decimal.
///
/// Parsing goes through the canonical string so `+20.85` and `.5` are
/// accepted. Values outside `Decimal`'s 96-bit mantissa return `None`.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    if !is_decimal_like(value) {
        return None;
    }
    Decimal::from_str(&canonical_decimal(value)).ok()
}

/// Canonical decimal string: no `+`, no redundant zeros, `-0` collapses to `0`.
///
/// Callers must have checked [`is_decimal_like`] first; the output is only
/// meaningful for text matching the decimal grammar.
pub fn canonical_decimal(value: &str) -> String {
    let mut s = normalize_text(value);
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    } else if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    }

    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (s, ""),
    };
    let int_part = {
        let trimmed = int_part.trim_start_matches('0');
        if trimmed.is_empty() { "0" } else { trimmed }
    };

    if frac_part.is_empty() {
        if int_part == "0" {
            return "0".to_string();
        }
        return if negative {
            format!("-{int_part}")
        } else {
            int_part.to_string()
        };
    }

    if negative {
        format!("-{int_part}.{frac_part}")
    } else {
        format!("{int_part}.{frac_part}")
    }
}

/// Canonical scalar used for equality and set membership.
///
/// Boolean parse wins over decimal parse wins over trimmed text; empty input
/// maps to the empty canonical.
pub fn canonical_scalar(value: &str) -> String {
    if is_empty(value) {
        return String::new();
    }
    if let Some(b) = parse_bool(value) {
        return if b { "true" } else { "false" }.to_string();
    }
    if is_decimal_like(value) {
        return canonical_decimal(value);
    }
    normalize_text(value).to_string()
}
