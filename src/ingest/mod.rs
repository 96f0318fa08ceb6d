//! Ingestion of tab-separated metadata with QIIME 2 comment directives.

mod directive;
mod metadata;

pub use directive::{directive_lines, DIRECTIVE_PREFIX};
pub use metadata::{read_metadata, read_metadata_file, read_unfiltered};
