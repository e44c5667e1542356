//! Extracted and resolved namesake records.

use crate::location::Coordinate;

/// A namesake place and the place it was named after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePair {
    pub namesake: String,
    pub original: String,
}

impl NamePair {
    pub fn new(namesake: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            namesake: namesake.into(),
            original: original.into(),
        }
    }
}

/// A name pair joined with its resolved coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecord {
    pub namesake: String,
    pub original: String,
    pub namesake_coord: Option<Coordinate>,
    pub original_coord: Option<Coordinate>,
}

impl ResolvedRecord {
    pub fn new(
        pair: NamePair,
        namesake_coord: Option<Coordinate>,
        original_coord: Option<Coordinate>,
    ) -> Self {
        Self {
            namesake: pair.namesake,
            original: pair.original,
            namesake_coord,
            original_coord,
        }
    }

    /// Both coordinates, if both resolved.
    pub fn coordinates(&self) -> Option<(Coordinate, Coordinate)> {
        Some((self.namesake_coord?, self.original_coord?))
    }
}
