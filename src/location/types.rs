//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Geocoding errors.
///
/// Only [`GeocodeError::Unavailable`] is transient; the resolver retries it
/// and surfaces everything else to the caller.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Geocoder unavailable: {0}")]
    Unavailable(String),
    #[error("Geocoder returned HTTP {0}")]
    Http(u16),
    #[error("Invalid geocoder response: {0}")]
    InvalidResponse(String),
    #[error("Gave up on '{query}' after {attempts} attempts")]
    RetriesExhausted { query: String, attempts: u32 },
}

impl GeocodeError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_display() {
        let c = Coordinate::new(48.8566, 2.3522);
        assert_eq!(c.to_string(), "(48.8566, 2.3522)");
    }

    #[test]
    fn test_only_unavailable_is_transient() {
        assert!(GeocodeError::Unavailable("timeout".into()).is_transient());
        assert!(!GeocodeError::Http(400).is_transient());
        assert!(!GeocodeError::InvalidResponse("bad".into()).is_transient());
    }
}
