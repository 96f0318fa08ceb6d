//! Uniqueness and shape checks shared by the loaders.

use crate::data::Table;
use crate::error::{Result, TableError};
use log::debug;
use std::collections::HashSet;

fn all_distinct(labels: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(labels.len());
    labels.iter().all(|label| seen.insert(label.as_str()))
}

/// Fail if the row identifiers or the column labels of a table repeat.
///
/// Row identifiers are checked first, so a table with both problems reports
/// the index.
///
/// # Arguments
/// * `table` - The table to check
/// * `name` - How the table is named in the error message
pub fn ensure_unique_headers(table: &Table, name: &str) -> Result<()> {
    if !all_distinct(table.index()) {
        return Err(TableError::Validation(format!(
            "Row identifiers of the {} table are not unique.",
            name
        )));
    }
    if !all_distinct(table.columns()) {
        return Err(TableError::Validation(format!(
            "Columns of the {} table are not unique.",
            name
        )));
    }
    Ok(())
}

/// Basic validation: unique headers, then minimum row and column counts.
pub fn validate_table(table: &Table, name: &str, min_rows: usize, min_cols: usize) -> Result<()> {
    ensure_unique_headers(table, name)?;
    debug!("Ensured uniqueness of {}.", name);

    if table.n_rows() < min_rows {
        return Err(TableError::Validation(format!(
            "Less than {} rows found in the {}.",
            min_rows, name
        )));
    }
    if table.n_cols() < min_cols {
        return Err(TableError::Validation(format!(
            "Less than {} columns found in the {}.",
            min_cols, name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Cell;

    fn table(index: &[&str], columns: &[&str]) -> Table {
        let rows = index
            .iter()
            .map(|_| columns.iter().map(|_| Cell::Missing).collect())
            .collect();
        Table::new(
            index.iter().map(|s| s.to_string()).collect(),
            columns.iter().map(|s| s.to_string()).collect(),
            rows,
        )
        .unwrap()
    }

    #[test]
    fn test_unique_headers_pass() {
        assert!(ensure_unique_headers(&table(&["a", "b"], &["x", "y"]), "t").is_ok());
    }

    #[test]
    fn test_duplicate_index() {
        let err = ensure_unique_headers(&table(&["a", "a"], &["x", "y"]), "ranks").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Row identifiers of the ranks"));
    }

    #[test]
    fn test_duplicate_columns() {
        let err = ensure_unique_headers(&table(&["a", "b"], &["x", "x"]), "ranks").unwrap_err();
        assert!(err.to_string().contains("Columns of the ranks"));
    }

    #[test]
    fn test_index_error_takes_precedence() {
        let err = ensure_unique_headers(&table(&["a", "a"], &["x", "x"]), "t").unwrap_err();
        assert!(err.to_string().starts_with("Row identifiers"));
    }

    #[test]
    fn test_validate_min_rows() {
        let err = validate_table(&table(&["a"], &["x"]), "sample metadata", 2, 1).unwrap_err();
        assert_eq!(err.to_string(), "Less than 2 rows found in the sample metadata.");
    }

    #[test]
    fn test_validate_min_cols() {
        let err = validate_table(&table(&["a"], &["x"]), "ranks", 1, 2).unwrap_err();
        assert_eq!(err.to_string(), "Less than 2 columns found in the ranks.");
    }

    #[test]
    fn test_validate_empty_table() {
        let empty = Table::empty(vec!["x".to_string()]);
        assert!(validate_table(&empty, "t", 0, 1).is_ok());
        assert!(validate_table(&empty, "t", 1, 1).is_err());
    }
}
