//! Coordinate resolver: cache first, then the geocoder with retry.
//!
//! Transient provider failures are retried with a linearly growing sleep and
//! never surface unless the retry policy is capped. A definitive "not found"
//! is cached like any other answer.

use super::cache::CoordinateCache;
use super::providers::Geocoder;
use super::retry::RetryPolicy;
use super::types::{Coordinate, GeocodeError};

/// Resolves place names to coordinates through an injected [`Geocoder`].
pub struct CoordinateResolver<G> {
    geocoder: G,
    cache: CoordinateCache,
    retry: RetryPolicy,
    lookups: usize,
}

impl<G: Geocoder> CoordinateResolver<G> {
    pub fn new(geocoder: G, cache: CoordinateCache, retry: RetryPolicy) -> Self {
        Self {
            geocoder,
            cache,
            retry,
            lookups: 0,
        }
    }

    /// Resolve `name` exactly as given. The caller is responsible for
    /// excluding empty or placeholder names.
    pub fn resolve(&mut self, name: &str) -> Result<Option<Coordinate>, GeocodeError> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(cached);
        }

        let resolved = self.lookup_with_retry(name)?;
        self.cache.put(name, resolved);
        Ok(resolved)
    }

    fn lookup_with_retry(&mut self, name: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let mut failures: u32 = 0;
        loop {
            self.lookups += 1;
            match self.geocoder.geocode(name) {
                Err(e) if e.is_transient() => {
                    failures += 1;
                    if !self.retry.allows_another(failures) {
                        return Err(GeocodeError::RetriesExhausted {
                            query: name.to_string(),
                            attempts: failures,
                        });
                    }
                    let delay = self.retry.delay_for(failures);
                    tracing::warn!(
                        query = name,
                        error = %e,
                        attempt = failures,
                        delay_secs = delay.as_secs_f64(),
                        "geocoder unavailable, retrying"
                    );
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
                other => return other,
            }
        }
    }

    /// Number of requests sent to the geocoder, retries included.
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    pub fn cache(&self) -> &CoordinateCache {
        &self.cache
    }
}
