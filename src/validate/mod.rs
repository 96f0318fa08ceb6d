//! Structural validation of tables.

mod headers;

pub use headers::{ensure_unique_headers, validate_table};
