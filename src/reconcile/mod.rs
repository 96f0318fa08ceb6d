//! Reconciliation of full and truncated GNPS feature identifiers.

mod feature_id;
mod gnps;

pub use feature_id::{
    format_truncated, truncate_identifier, KeyState, Resolution, TruncatedIdMap, TRUNCATED_DECIMALS,
};
pub use gnps::{
    read_gnps_feature_metadata, reconcile, reconcile_with_report, ReconcileConfig, ReconcileResult,
};
