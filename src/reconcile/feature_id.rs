//! Full and truncated GNPS feature identifiers.
//!
//! A full feature ID is `"<m/z>;<retention time>"` as it appears in the ranks
//! and abundance tables. GNPS metadata stores the same numbers at lower
//! precision, so both sides are reduced to four decimal places for matching.

use crate::error::{Result, TableError};
use log::warn;
use std::collections::HashMap;

/// Decimal places kept in a truncated feature ID.
pub const TRUNCATED_DECIMALS: usize = 4;

fn parse_field(field: &str, full_id: &str) -> Result<f64> {
    let value: f64 = field.trim().parse().map_err(|_| {
        TableError::Format(format!(
            "Feature ID '{}' has a non-numeric field '{}'",
            full_id, field
        ))
    })?;
    if !value.is_finite() {
        return Err(TableError::Format(format!(
            "Feature ID '{}' has a non-finite field '{}'",
            full_id, field
        )));
    }
    Ok(value)
}

/// Format an (m/z, retention time) pair as a truncated feature ID.
///
/// Values are rounded to the nearest representable four-decimal string,
/// not cut off.
pub fn format_truncated(mz: f64, rt: f64) -> String {
    format!(
        "{:.prec$};{:.prec$}",
        mz,
        rt,
        prec = TRUNCATED_DECIMALS
    )
}

/// Compute the truncated feature ID of a full feature ID.
///
/// Fails with a format error unless the ID is exactly two numbers separated
/// by `;`.
pub fn truncate_identifier(full_id: &str) -> Result<String> {
    let fields: Vec<&str> = full_id.split(';').collect();
    if fields.len() != 2 {
        return Err(TableError::Format(format!(
            "Feature ID '{}' must have exactly 2 ';'-separated fields, found {}",
            full_id,
            fields.len()
        )));
    }
    let mz = parse_field(fields[0], full_id)?;
    let rt = parse_field(fields[1], full_id)?;
    Ok(format_truncated(mz, rt))
}

/// State of one truncated key while the mapping is built.
///
/// `Unseen` is represented by absence from the map. `Conflicted` is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyState {
    /// Exactly one full ID truncates to this key.
    Mapped(String),
    /// Two or more distinct full IDs truncate to this key.
    Conflicted,
}

/// Outcome of resolving a truncated ID against the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The unique full ID for this key.
    Full(&'a str),
    /// Ambiguous key; rows carrying it must be dropped.
    Conflict,
    /// No reference ID truncates to this key.
    Unmatched,
}

/// Mapping from truncated feature IDs back to full feature IDs.
#[derive(Debug, Clone, Default)]
pub struct TruncatedIdMap {
    states: HashMap<String, KeyState>,
}

impl TruncatedIdMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from full feature IDs.
    pub fn from_full_ids<I, S>(full_ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for full_id in full_ids {
            map.observe(full_id.as_ref())?;
        }
        Ok(map)
    }

    /// Record one full feature ID.
    ///
    /// Seeing the same full ID twice is not a conflict; a second distinct full
    /// ID for a key moves it to [`KeyState::Conflicted`].
    pub fn observe(&mut self, full_id: &str) -> Result<()> {
        let truncated = truncate_identifier(full_id)?;
        match self.states.get_mut(&truncated) {
            None => {
                self.states
                    .insert(truncated, KeyState::Mapped(full_id.to_string()));
            }
            Some(state) => {
                if let KeyState::Mapped(existing) = state {
                    if existing.as_str() != full_id {
                        warn!(
                            "Indistinguishable rows in GNPS feature metadata file with truncated ID {}.",
                            truncated
                        );
                        *state = KeyState::Conflicted;
                    }
                }
            }
        }
        Ok(())
    }

    /// Look up a truncated feature ID.
    pub fn resolve(&self, truncated: &str) -> Resolution<'_> {
        match self.states.get(truncated) {
            Some(KeyState::Mapped(full)) => Resolution::Full(full),
            Some(KeyState::Conflicted) => Resolution::Conflict,
            None => Resolution::Unmatched,
        }
    }

    /// Current state of a key, `None` when unseen.
    pub fn state(&self, truncated: &str) -> Option<&KeyState> {
        self.states.get(truncated)
    }

    /// Number of keys that became ambiguous.
    pub fn n_conflicted(&self) -> usize {
        self.states
            .values()
            .filter(|s| matches!(s, KeyState::Conflicted))
            .count()
    }

    /// Number of distinct truncated keys seen.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True when no IDs have been observed.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
