//! Loading of tab-separated metadata files into string tables.

use super::directive::directive_lines;
use crate::data::{Cell, PathSource, Table, TextSource};
use crate::error::{Result, TableError};
use log::debug;
use std::collections::HashSet;
use std::path::Path;

/// Header and verbatim cells of a tab-separated source, directives removed.
struct RawRecords {
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// Parse a source as TSV, skipping the directive lines after the header.
///
/// Cells are kept verbatim. Rows shorter than the header are padded with
/// missing cells; longer rows are an error.
fn read_raw<S: TextSource + ?Sized>(source: &mut S) -> Result<RawRecords> {
    let skip: HashSet<usize> = directive_lines(source)?.into_iter().collect();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(&mut *source);

    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        // csv positions are 1-based
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let line_idx = line.saturating_sub(1) as usize;
        if skip.contains(&line_idx) {
            continue;
        }

        let n_columns = match &header {
            Some(columns) => columns.len(),
            None => {
                header = Some(record.iter().map(str::to_string).collect());
                continue;
            }
        };

        // A line of bare whitespace has no delimiter; treat it like a blank line.
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }
        if record.len() > n_columns {
            return Err(TableError::RaggedRow {
                line,
                expected: n_columns,
                found: record.len(),
            });
        }

        let mut row: Vec<Cell> = record.iter().map(Cell::from).collect();
        row.resize(n_columns, Cell::Missing);
        rows.push(row);
    }

    let header = header
        .ok_or_else(|| TableError::Validation("No columns to parse from metadata file.".to_string()))?;
    Ok(RawRecords { header, rows })
}

fn normalize(cell: Cell) -> Cell {
    match cell {
        Cell::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Cell::Missing
            } else {
                Cell::Text(trimmed.to_string())
            }
        }
        Cell::Missing => Cell::Missing,
    }
}

/// Read a sample or feature metadata file.
///
/// Expected format:
/// - First row: header with column names (first column holds the IDs)
/// - Optional `#q2:` directive rows directly below the header (skipped)
/// - Subsequent rows: ID followed by values
///
/// All values stay strings. Surrounding whitespace is stripped, and values
/// that are empty afterwards become [`Cell::Missing`]. The first column
/// becomes the row index and must not contain an empty ID.
pub fn read_metadata<S: TextSource + ?Sized>(source: &mut S) -> Result<Table> {
    let raw = read_raw(source)?;

    let mut index = Vec::with_capacity(raw.rows.len());
    let mut rows = Vec::with_capacity(raw.rows.len());
    for row in raw.rows {
        let mut cells = row.into_iter().map(normalize);
        match cells.next() {
            Some(Cell::Text(id)) => index.push(id),
            _ => {
                return Err(TableError::Validation(
                    "Empty ID found in metadata file.".to_string(),
                ))
            }
        }
        rows.push(cells.collect());
    }

    let columns = raw.header[1..].to_vec();
    Table::new(index, columns, rows)
}

/// Convenience wrapper around [`read_metadata`] for a file on disk.
pub fn read_metadata_file<P: AsRef<Path>>(path: P) -> Result<Table> {
    let mut source = PathSource::open(path)?;
    debug!("Reading metadata from {}", source.path().display());
    read_metadata(&mut source)
}

/// Read a TSV without any value normalization.
///
/// Cells are kept exactly as written (an empty field is an empty string, not
/// missing) and rows are indexed by their zero-based position. Directive
/// lines are skipped as in [`read_metadata`].
pub fn read_unfiltered<S: TextSource + ?Sized>(source: &mut S) -> Result<Table> {
    let raw = read_raw(source)?;
    let index = (0..raw.rows.len()).map(|i| i.to_string()).collect();
    Table::new(index, raw.header, raw.rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BufferSource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load(text: &str) -> Result<Table> {
        read_metadata(&mut BufferSource::new(text))
    }

    #[test]
    fn test_load_metadata() {
        let table = load("Sample ID\tgroup\tage\nS1\tcontrol\t25\nS2\ttreatment\t30\n").unwrap();
        assert_eq!(table.index(), &["S1", "S2"]);
        assert_eq!(table.columns(), &["group", "age"]);
        assert_eq!(table.get("S2", "age").unwrap().as_text(), Some("30"));
    }

    #[test]
    fn test_ids_stay_strings() {
        let table = load("id\tx\n007\t1.50\n").unwrap();
        assert_eq!(table.index(), &["007"]);
        assert_eq!(table.get("007", "x").unwrap().as_text(), Some("1.50"));
    }

    #[test]
    fn test_whitespace_is_stripped() {
        let table = load("id\tx\n  S1 \t  a b  \n").unwrap();
        assert_eq!(table.index(), &["S1"]);
        assert_eq!(table.get("S1", "x").unwrap().as_text(), Some("a b"));
    }

    #[test]
    fn test_whitespace_only_value_is_missing() {
        let table = load("id\tx\ty\nS1\t  \t\n").unwrap();
        assert!(table.get("S1", "x").unwrap().is_missing());
        assert!(table.get("S1", "y").unwrap().is_missing());
    }

    #[test]
    fn test_na_tokens_are_kept() {
        let table = load("id\tx\nS1\tNA\nS2\tnan\n").unwrap();
        assert_eq!(table.get("S1", "x").unwrap().as_text(), Some("NA"));
        assert_eq!(table.get("S2", "x").unwrap().as_text(), Some("nan"));
    }

    #[test]
    fn test_whitespace_id_is_rejected() {
        let err = load("id\tx\n   \t1\n").unwrap_err();
        assert_eq!(err.to_string(), "Empty ID found in metadata file.");
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let err = load("id\tx\nS1\t1\n\t2\n").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_directives_are_skipped() {
        let table = load("id\tx\n#q2:types\tcategorical\nS1\t1\n").unwrap();
        assert_eq!(table.index(), &["S1"]);
    }

    #[test]
    fn test_late_directive_is_data() {
        let table = load("id\tx\nS1\t1\n#q2:types\tcategorical\n").unwrap();
        assert_eq!(table.index(), &["S1", "#q2:types"]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = load("id\tx\ty\nS1\t1\n").unwrap();
        assert!(table.get("S1", "y").unwrap().is_missing());
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let err = load("id\tx\nS1\t1\t2\n").unwrap_err();
        assert!(matches!(err, TableError::RaggedRow { expected: 2, found: 3, .. }));
    }

    #[test]
    fn test_index_column_only() {
        let table = load("id\nS1\nS2\n").unwrap();
        assert_eq!(table.index(), &["S1", "S2"]);
        assert_eq!(table.n_cols(), 0);
    }

    #[test]
    fn test_header_only() {
        let table = load("id\tx\ty\n").unwrap();
        assert_eq!(table.shape(), (0, 2));
    }

    #[test]
    fn test_empty_source() {
        assert!(load("").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "sample_id\tgroup").unwrap();
        writeln!(file, "#q2:types\tcategorical").unwrap();
        writeln!(file, "S1\tcontrol").unwrap();
        writeln!(file, "S2\t").unwrap();
        file.flush().unwrap();

        let table = read_metadata_file(file.path()).unwrap();
        assert_eq!(table.index(), &["S1", "S2"]);
        assert!(table.get("S2", "group").unwrap().is_missing());
    }

    #[test]
    fn test_unfiltered_keeps_cells_verbatim() {
        let mut source = BufferSource::new("parent mass\tLibraryID\n#q2:types\tx\n 1.5\t\n2.5\tabc\n");
        let table = read_unfiltered(&mut source).unwrap();
        assert_eq!(table.index(), &["0", "1"]);
        assert_eq!(table.columns(), &["parent mass", "LibraryID"]);
        assert_eq!(table.get("0", "parent mass").unwrap().as_text(), Some(" 1.5"));
        assert_eq!(table.get("0", "LibraryID").unwrap().as_text(), Some(""));
    }
}
