//! Core data structures: tables and readable text sources.

mod source;
mod table;

pub use source::{BufferSource, PathSource, TextSource};
pub use table::{Cell, Table};
