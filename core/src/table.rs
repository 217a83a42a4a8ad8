use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// An immutable in-memory table: ordered headers plus rows of raw cell text.
///
/// Rows are stored as fixed-offset vectors padded to the header width, with a
/// header-to-index map for O(1) lookup by name. The origin path is carried
/// for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    source: PathBuf,
    headers: Vec<String>,
    header_index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("duplicate header {0:?}")]
    DuplicateHeader(String),
    #[error("table has no columns")]
    NoColumns,
}

impl Table {
    /// Builds a table, padding or truncating each row to the header width.
    pub fn new(
        source: impl AsRef<Path>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Table, TableError> {
        if headers.is_empty() {
            return Err(TableError::NoColumns);
        }

        let mut header_index = HashMap::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            if header_index.insert(name.clone(), idx).is_some() {
                return Err(TableError::DuplicateHeader(name.clone()));
            }
        }

        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Ok(Table {
            source: source.as_ref().to_path_buf(),
            headers,
            header_index,
            rows,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn col_index(&self, name: &str) -> Option<usize> {
        self.header_index.get(name).copied()
    }

    /// Raw cell text at (row, column). Both indices must be in bounds.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }

    /// Iterates the raw cells of one column in row order.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| row[col].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_truncated() {
        let table = Table::new(
            "test.csv",
            owned(&["a", "b", "c"]),
            vec![owned(&["1"]), owned(&["1", "2", "3", "4"])],
        )
        .expect("valid table");

        assert_eq!(table.cell(0, 1), "");
        assert_eq!(table.cell(0, 2), "");
        assert_eq!(table.cell(1, 2), "3");
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let err = Table::new("t.csv", owned(&["a", "b", "a"]), Vec::new())
            .expect_err("duplicate header should be rejected");
        assert_eq!(err, TableError::DuplicateHeader("a".to_string()));
    }

    #[test]
    fn empty_header_list_is_rejected() {
        let err = Table::new("t.csv", Vec::new(), Vec::new())
            .expect_err("headerless table should be rejected");
        assert_eq!(err, TableError::NoColumns);
    }

    #[test]
    fn header_lookup_preserves_declaration_order() {
        let table = Table::new("t.csv", owned(&["x", "y"]), vec![owned(&["1", "2"])])
            .expect("valid table");
        assert_eq!(table.col_index("y"), Some(1));
        assert_eq!(table.col_index("missing"), None);
        assert_eq!(table.headers(), &["x".to_string(), "y".to_string()]);
        assert_eq!(table.column_values(1).collect::<Vec<_>>(), vec!["2"]);
    }
}
