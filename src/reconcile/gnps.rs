//! Re-indexing GNPS feature metadata onto full feature IDs.

use super::feature_id::{format_truncated, Resolution, TruncatedIdMap};
use crate::data::{Cell, Table, TextSource};
use crate::error::{Result, TableError};
use crate::ingest::read_unfiltered;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which GNPS columns to match on and which to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Column holding the precursor m/z.
    pub mz_column: String,
    /// Column holding the consensus retention time.
    pub rt_column: String,
    /// Columns retained in the re-indexed output.
    pub keep_columns: Vec<String>,
    /// Name of the external table in error and log messages.
    pub name: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            mz_column: "parent mass".to_string(),
            rt_column: "RTConsensus".to_string(),
            keep_columns: vec!["LibraryID".to_string()],
            name: "GNPS feature metadata".to_string(),
        }
    }
}

impl ReconcileConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(TableError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(TableError::from)
    }
}

/// Result of reconciliation with statistics.
#[derive(Debug, Clone)]
pub struct ReconcileResult {
    /// Re-indexed, projected table.
    pub table: Table,
    /// Number of external rows before reconciliation.
    pub n_before: usize,
    /// Rows dropped because their truncated ID is ambiguous.
    pub n_conflicting: usize,
    /// Rows dropped because no reference ID truncates to their key.
    pub n_unmatched: usize,
}

impl ReconcileResult {
    /// Number of rows that survived.
    pub fn n_after(&self) -> usize {
        self.table.n_rows()
    }
}

impl std::fmt::Display for ReconcileResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Reconcile Result")?;
        writeln!(f, "  Before:      {} rows", self.n_before)?;
        writeln!(f, "  After:       {} rows", self.n_after())?;
        writeln!(f, "  Conflicting: {} rows", self.n_conflicting)?;
        writeln!(f, "  Unmatched:   {} rows", self.n_unmatched)?;
        Ok(())
    }
}

fn numeric_cell(cell: &Cell, column: &str, row_id: &str) -> Result<f64> {
    let text = cell.as_text().unwrap_or("");
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            TableError::Format(format!(
                "Value '{}' in column '{}' (row {}) is not a number",
                text, column, row_id
            ))
        })
}

/// Re-index an external feature table onto full feature IDs, with statistics.
///
/// # Arguments
/// * `reference` - Table indexed by full feature IDs (e.g. feature ranks)
/// * `external` - Table with low-precision m/z and RT columns
/// * `config` - Column names to match on and to keep
///
/// # Returns
/// The external rows whose truncated ID maps to exactly one full ID, indexed
/// by that full ID and restricted to `config.keep_columns`. Rows with an
/// ambiguous or unknown key are dropped and counted.
pub fn reconcile_with_report(
    reference: &Table,
    external: &Table,
    config: &ReconcileConfig,
) -> Result<ReconcileResult> {
    let map = TruncatedIdMap::from_full_ids(reference.index())?;

    let mz_values = external.column(&config.mz_column)?;
    let rt_values = external.column(&config.rt_column)?;
    for column in &config.keep_columns {
        if !external.has_column(column) {
            warn!("Column '{}' not found in the {}; it will be omitted.", column, config.name);
        }
    }

    let mut keep_positions = Vec::new();
    let mut full_ids = Vec::new();
    let mut n_conflicting = 0;
    let mut n_unmatched = 0;

    for (pos, row_id) in external.index().iter().enumerate() {
        let mz = numeric_cell(mz_values[pos], &config.mz_column, row_id)?;
        let rt = numeric_cell(rt_values[pos], &config.rt_column, row_id)?;
        let truncated = format_truncated(mz, rt);

        match map.resolve(&truncated) {
            Resolution::Full(full_id) => {
                keep_positions.push(pos);
                full_ids.push(full_id.to_string());
            }
            Resolution::Conflict => n_conflicting += 1,
            Resolution::Unmatched => n_unmatched += 1,
        }
    }

    if n_conflicting > 0 {
        warn!(
            "Dropped {} row(s) of the {} with ambiguous truncated feature IDs.",
            n_conflicting, config.name
        );
    }
    if n_unmatched > 0 {
        debug!(
            "Dropped {} row(s) of the {} with no matching feature ID.",
            n_unmatched, config.name
        );
    }

    let mut seen = HashSet::with_capacity(full_ids.len());
    if let Some(dup) = full_ids.iter().find(|id| !seen.insert(id.as_str())) {
        return Err(TableError::Validation(format!(
            "Duplicate full feature ID '{}' in the {} after reconciliation.",
            dup, config.name
        )));
    }

    let table = external
        .take_rows(&keep_positions)
        .with_index(full_ids)?
        .select_columns(&config.keep_columns);

    Ok(ReconcileResult {
        table,
        n_before: external.n_rows(),
        n_conflicting,
        n_unmatched,
    })
}

/// Re-index an external feature table onto full feature IDs.
///
/// See [`reconcile_with_report`] for details.
pub fn reconcile(reference: &Table, external: &Table, config: &ReconcileConfig) -> Result<Table> {
    reconcile_with_report(reference, external, config).map(|r| r.table)
}

/// Read a GNPS feature metadata file and match it to the features of a ranks table.
///
/// The file is read without value normalization before reconciliation.
pub fn read_gnps_feature_metadata<S: TextSource + ?Sized>(
    source: &mut S,
    feature_ranks: &Table,
    config: &ReconcileConfig,
) -> Result<Table> {
    let external = read_unfiltered(source)?;
    reconcile(feature_ranks, &external, config)
}
