//! Seams to the external collaborators of the planner.
//!
//! The planner only talks to providers through these traits. Concrete
//! adapters live in [`crate::provider`]; tests supply in-process mocks.

use crate::coords::Coordinate;
use crate::error::ProviderError;
use crate::extract::{Bookmark, Extraction};
use crate::geocode::GeocodeResult;
use crate::trip::TripResponse;

/// Forward and reverse geocoding. At most one result per query.
pub trait Geocoder {
    /// Country-restricted, limit-1 lookup. `Ok(None)` when nothing matched.
    fn forward(&self, query: &str) -> Result<Option<GeocodeResult>, ProviderError>;

    fn reverse(&self, coordinate: Coordinate) -> Result<Option<GeocodeResult>, ProviderError>;
}

/// Executes a built optimized-trip request.
pub trait TripProvider {
    fn optimized_trip(&self, url: &str) -> Result<TripResponse, ProviderError>;
}

/// String key-value storage scoped by the caller's key prefix.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// AI-assisted address extraction from free text.
pub trait AddressExtractor {
    type Error: std::fmt::Display;

    fn extract(&self, text: &str, bookmarks: &[Bookmark]) -> Result<Extraction, Self::Error>;
}
