//! String-typed tables keyed by a row identifier index.

use crate::error::{Result, TableError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// A single cell value. Ingestion never coerces to numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// A (whitespace-normalized) string value.
    Text(String),
    /// Missing value. Serializes as `null`.
    Missing,
}

impl Cell {
    /// Check if this is a missing value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Try to get the text of this cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Missing => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

/// An ordered set of named columns over rows addressed by an index.
///
/// Construction only checks shape. Uniqueness of row identifiers and column
/// labels is left to [`crate::validate`] so that callers can observe (and
/// report) violations instead of having them rejected implicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Row identifiers in order.
    index: Vec<String>,
    /// Column labels in order.
    columns: Vec<String>,
    /// Row-major cells; every row has `columns.len()` entries.
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a table, checking that every row has one cell per column.
    pub fn new(index: Vec<String>, columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        if index.len() != rows.len() {
            return Err(TableError::DimensionMismatch {
                expected: index.len(),
                actual: rows.len(),
            });
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != columns.len()) {
            return Err(TableError::DimensionMismatch {
                expected: columns.len(),
                actual: bad.len(),
            });
        }
        Ok(Self {
            index,
            columns,
            rows,
        })
    }

    /// A table with the given columns and no rows.
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            index: Vec::new(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Row identifiers in order.
    pub fn index(&self) -> &[String] {
        &self.index
    }

    /// Column labels in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    /// Position of the first column with this label.
    pub fn column_position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Position of the first row with this identifier.
    pub fn row_position(&self, row_id: &str) -> Option<usize> {
        self.index.iter().position(|r| r == row_id)
    }

    /// Check if a column exists.
    pub fn has_column(&self, column: &str) -> bool {
        self.column_position(column).is_some()
    }

    /// Get the cell at a row identifier and column label.
    pub fn get(&self, row_id: &str, column: &str) -> Option<&Cell> {
        let r = self.row_position(row_id)?;
        let c = self.column_position(column)?;
        self.rows.get(r).and_then(|row| row.get(c))
    }

    /// All values of a column, in row order.
    pub fn column(&self, column: &str) -> Result<Vec<&Cell>> {
        let c = self
            .column_position(column)
            .ok_or_else(|| TableError::MissingColumn(column.to_string()))?;
        Ok(self.rows.iter().map(|row| &row[c]).collect())
    }

    /// Iterate over `(row identifier, cells)` pairs.
    pub fn iter_rows(&self) -> impl Iterator<Item = (&str, &[Cell])> + '_ {
        self.index
            .iter()
            .zip(self.rows.iter())
            .map(|(id, row)| (id.as_str(), row.as_slice()))
    }

    /// A copy of this table with its column labels replaced.
    pub fn with_columns(&self, columns: Vec<String>) -> Result<Self> {
        if columns.len() != self.columns.len() {
            return Err(TableError::DimensionMismatch {
                expected: self.columns.len(),
                actual: columns.len(),
            });
        }
        Ok(Self {
            index: self.index.clone(),
            columns,
            rows: self.rows.clone(),
        })
    }

    /// A copy of this table with its row identifiers replaced.
    pub fn with_index(&self, index: Vec<String>) -> Result<Self> {
        Self::new(index, self.columns.clone(), self.rows.clone())
    }

    /// Keep only the requested columns that exist, in the requested order.
    ///
    /// Labels that are not present are ignored rather than reported.
    pub fn select_columns<S: AsRef<str>>(&self, items: &[S]) -> Self {
        let positions: Vec<usize> = items
            .iter()
            .filter_map(|item| self.column_position(item.as_ref()))
            .collect();
        Self {
            index: self.index.clone(),
            columns: positions.iter().map(|&c| self.columns[c].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| positions.iter().map(|&c| row[c].clone()).collect())
                .collect(),
        }
    }

    /// Keep the rows at the given positions, in the given order.
    pub fn take_rows(&self, positions: &[usize]) -> Self {
        Self {
            index: positions.iter().map(|&r| self.index[r].clone()).collect(),
            columns: self.columns.clone(),
            rows: positions.iter().map(|&r| self.rows[r].clone()).collect(),
        }
    }

    /// A copy with every missing cell replaced by `value`.
    pub fn fill_missing(&self, value: &str) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Missing => Cell::Text(value.to_string()),
                        other => other.clone(),
                    })
                    .collect()
            })
            .collect();
        Self {
            index: self.index.clone(),
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Convert to a list of JSON records, one object per row.
    ///
    /// The row identifier is stored under `index_label`; missing cells become `null`.
    pub fn to_json_records(&self, index_label: &str) -> Result<Value> {
        let mut records = Vec::with_capacity(self.n_rows());
        for (id, row) in self.iter_rows() {
            let mut obj = Map::new();
            obj.insert(index_label.to_string(), Value::String(id.to_string()));
            for (label, cell) in self.columns.iter().zip(row) {
                obj.insert(label.clone(), serde_json::to_value(cell)?);
            }
            records.push(Value::Object(obj));
        }
        Ok(Value::Array(records))
    }

    /// Write the table to a TSV file. Missing cells are written as empty fields.
    ///
    /// Fields containing tabs, quotes or newlines are quoted so the file reads
    /// back to the same table.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P, index_label: &str) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(path)?;

        let mut header = Vec::with_capacity(self.n_cols() + 1);
        header.push(index_label);
        header.extend(self.columns.iter().map(String::as_str));
        writer.write_record(&header)?;

        for (id, row) in self.iter_rows() {
            let mut record = Vec::with_capacity(row.len() + 1);
            record.push(id);
            record.extend(row.iter().map(|cell| cell.as_text().unwrap_or("")));
            writer.write_record(&record)?;
        }
        writer.flush()?;

        Ok(())
    }
}
