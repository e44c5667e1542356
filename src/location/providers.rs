//! Geocoding providers.
//!
//! The resolver talks to a [`Geocoder`], never to HTTP directly, so tests can
//! substitute an in-memory double for [`Nominatim`].

use super::types::{Coordinate, GeocodeError};
use serde::Deserialize;
use std::time::Duration;

/// A free-text place lookup.
///
/// `Ok(None)` is a definitive "no match". `Err(GeocodeError::Unavailable)`
/// means the same request may succeed later.
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<Option<Coordinate>, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, query: &str) -> Result<Option<Coordinate>, GeocodeError> {
        (**self).geocode(query)
    }
}

// ─── Nominatim ───────────────────────────────────────────────────

pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Raw Nominatim search result.
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimResult {
    fn coordinate(&self) -> Result<Coordinate, GeocodeError> {
        let parse = |field: &str, value: &str, limit: f64| {
            match value.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v.abs() <= limit => Ok(v),
                _ => Err(GeocodeError::InvalidResponse(format!(
                    "{} is not a valid coordinate: '{}'",
                    field, value
                ))),
            }
        };
        Ok(Coordinate::new(
            parse("lat", &self.lat, 90.0)?,
            parse("lon", &self.lon, 180.0)?,
        ))
    }
}

/// OpenStreetMap Nominatim search client returning the best match only.
pub struct Nominatim {
    agent: ureq::Agent,
    endpoint: String,
    user_agent: String,
}

impl Nominatim {
    pub fn new(user_agent: &str) -> Self {
        Self::with_endpoint(NOMINATIM_SEARCH_URL, user_agent, Duration::from_secs(10))
    }

    pub fn with_endpoint(endpoint: &str, user_agent: &str, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            endpoint: endpoint.to_string(),
            user_agent: user_agent.to_string(),
        }
    }
}

impl Geocoder for Nominatim {
    fn geocode(&self, query: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let response = self
            .agent
            .get(&self.endpoint)
            .query("q", query)
            .query("format", "json")
            .query("limit", "1")
            .set("User-Agent", &self.user_agent)
            .call()
            .map_err(classify_error)?;

        let results: Vec<NominatimResult> = response
            .into_json()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        match results.first() {
            Some(top) => {
                tracing::trace!(
                    query,
                    display_name = top.display_name.as_deref().unwrap_or(""),
                    "nominatim match"
                );
                top.coordinate().map(Some)
            }
            None => Ok(None),
        }
    }
}

/// Throttling, gateway and transport failures are worth retrying; any other
/// HTTP status is not.
fn classify_error(err: ureq::Error) -> GeocodeError {
    match err {
        ureq::Error::Status(code @ (429 | 502 | 503 | 504), _) => {
            GeocodeError::Unavailable(format!("HTTP {}", code))
        }
        ureq::Error::Status(code, _) => GeocodeError::Http(code),
        ureq::Error::Transport(t) => GeocodeError::Unavailable(t.to_string()),
    }
}
