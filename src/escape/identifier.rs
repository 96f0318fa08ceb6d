//! Character substitution for field names.
//!
//! Vega-Lite treats `.` and `[]` in a field name as nested access and chokes
//! on quotes and backslashes, so these are replaced before a table is handed
//! to rendering.

use crate::data::Table;
use crate::error::Result;
use crate::validate::ensure_unique_headers;

fn escape_char(c: char) -> char {
    match c {
        '.' => ':',
        ']' => ')',
        '[' => '(',
        '\'' | '"' | '\\' => '|',
        other => other,
    }
}

/// Escape a single identifier, character by character.
pub fn escape_identifier(id: &str) -> String {
    id.chars().map(escape_char).collect()
}

/// Escape every column label of a table.
///
/// Returns a new table; the input is untouched. Fails with a validation
/// error if escaping made two labels identical.
pub fn escape_columns(table: &Table) -> Result<Table> {
    let escaped = table.with_columns(table.columns().iter().map(|c| escape_identifier(c)).collect())?;
    ensure_unique_headers(&escaped, "escape_columns()")?;
    Ok(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Cell;

    #[test]
    fn test_escape_each_trigger() {
        assert_eq!(escape_identifier("a.b"), "a:b");
        assert_eq!(escape_identifier("x[0]"), "x(0)");
        assert_eq!(escape_identifier(r#"it's "q" \n"#), "it|s |q| |n");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(escape_identifier("Sample ID_1 (b)"), "Sample ID_1 (b)");
        assert_eq!(escape_identifier(""), "");
        assert_eq!(escape_identifier("μ-ß"), "μ-ß");
    }

    #[test]
    fn test_idempotent() {
        for s in ["C(Timepoint, Treatment('F'))[T.PF]", "a.b.c", "\\\\", "plain"] {
            let once = escape_identifier(s);
            assert_eq!(escape_identifier(&once), once);
        }
        assert_eq!(
            escape_identifier("C(Timepoint, Treatment('F'))[T.PF]"),
            "C(Timepoint, Treatment(|F|))(T:PF)"
        );
    }

    #[test]
    fn test_escape_columns_is_pure() {
        let table = Table::new(
            vec!["S1".into()],
            vec!["a.b".into(), "c".into()],
            vec![vec!["1".into(), Cell::Missing]],
        )
        .unwrap();
        let escaped = escape_columns(&table).unwrap();
        assert_eq!(escaped.columns(), &["a:b", "c"]);
        assert_eq!(table.columns(), &["a.b", "c"]);
        assert_eq!(escaped.index(), table.index());
    }

    #[test]
    fn test_escape_columns_collision() {
        let table = Table::new(
            vec!["S1".into()],
            vec!["a.b".into(), "a:b".into()],
            vec![vec!["1".into(), "2".into()]],
        )
        .unwrap();
        let err = escape_columns(&table).unwrap_err();
        assert!(err.is_validation());
    }
}
