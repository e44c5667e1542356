//! Coordinate resolution subsystem.
//!
//! Turns free-text place names into coordinates through a pluggable geocoder,
//! with a bounded cache and a retry policy for provider outages.

pub mod cache;
pub mod providers;
pub mod resolver;
pub mod retry;
pub mod types;

pub use cache::CoordinateCache;
pub use providers::{Geocoder, Nominatim};
pub use resolver::CoordinateResolver;
pub use retry::RetryPolicy;
pub use types::{Coordinate, GeocodeError};
