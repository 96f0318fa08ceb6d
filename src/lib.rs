//! Metadata ingestion and feature ID reconciliation for rank plots.
//!
//! This library turns the tab-separated inputs of a rank/log-ratio
//! visualization (feature ranks, sample metadata, feature metadata, GNPS
//! feature annotations) into validated string tables that can be handed to a
//! plotting layer.
//!
//! # Overview
//!
//! - **data**: Core data structures (Table, Cell) and re-readable text sources
//! - **validate**: Uniqueness and minimum-shape checks
//! - **ingest**: `#q2:` directive detection and metadata loading
//! - **escape**: Field name escaping for Vega-Lite
//! - **reconcile**: Matching truncated GNPS feature IDs back to full IDs
//!
//! # Example
//!
//! ```no_run
//! use qurro_tables::prelude::*;
//!
//! let ranks = read_metadata_file("ranks.tsv").unwrap();
//! validate_table(&ranks, "feature ranks", 1, 1).unwrap();
//!
//! let mut gnps = PathSource::open("gnps.tsv").unwrap();
//! let annotations =
//!     read_gnps_feature_metadata(&mut gnps, &ranks, &ReconcileConfig::default()).unwrap();
//!
//! let sample_metadata = escape_columns(&read_metadata_file("metadata.tsv").unwrap()).unwrap();
//! ```

pub mod data;
pub mod error;
pub mod escape;
pub mod ingest;
pub mod reconcile;
pub mod validate;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::data::{BufferSource, Cell, PathSource, Table, TextSource};
    pub use crate::error::{Result, TableError};
    pub use crate::escape::{escape_columns, escape_identifier};
    pub use crate::ingest::{
        directive_lines, read_metadata, read_metadata_file, read_unfiltered, DIRECTIVE_PREFIX,
    };
    pub use crate::reconcile::{
        read_gnps_feature_metadata, reconcile, reconcile_with_report, truncate_identifier,
        KeyState, ReconcileConfig, ReconcileResult, Resolution, TruncatedIdMap,
    };
    pub use crate::validate::{ensure_unique_headers, validate_table};
}
