//! # Identifiers
//!
//! - [`SourceId`]: string identifier of a fare source (provider)
//! - [`CollectionRunId`]: UUID identifying one orchestration run

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a fare source, e.g. `"skyscanner"` or `"amadeus"`.
///
/// Ordering is lexicographic, which gives source-keyed maps a stable
/// iteration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    /// Creates a source id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifier of a single collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionRunId(Uuid);

impl CollectionRunId {
    /// Creates a random run id.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for CollectionRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_id_orders_lexicographically() {
        let mut ids = vec![SourceId::new("kayak"), SourceId::new("amadeus")];
        ids.sort();
        assert_eq!(ids.first().map(SourceId::as_str), Some("amadeus"));
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(CollectionRunId::new_v4(), CollectionRunId::new_v4());
    }
}
