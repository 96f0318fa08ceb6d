//! Escaping of identifiers for the downstream visualization grammar.

mod identifier;

pub use identifier::{escape_columns, escape_identifier};
