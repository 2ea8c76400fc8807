//! Session-scoped geocode caches.
//!
//! Both caches live for one planning session and are owned by it; nothing
//! here is global, so separate sessions never see each other's entries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::coords::{parse_coordinate_pair, Coordinate};
use crate::error::GeocodeError;
use crate::traits::Geocoder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub display_label: String,
    pub coordinate: Coordinate,
}

/// Lowercases, collapses runs of whitespace and trims.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Forward geocode memo keyed by normalized query.
#[derive(Debug, Clone, Default)]
pub struct GeocodeCache {
    entries: HashMap<String, GeocodeResult>,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers without the network: literal coordinate pairs and cache hits.
    pub fn lookup(&self, query: &str) -> Option<GeocodeResult> {
        if let Some(typed) = parse_coordinate_pair(query) {
            return Some(GeocodeResult {
                display_label: typed.display,
                coordinate: typed.coordinate,
            });
        }
        self.entries.get(&normalize_query(query)).cloned()
    }

    pub fn insert(&mut self, query: &str, result: GeocodeResult) {
        self.entries.insert(normalize_query(query), result);
    }

    pub fn resolve<G>(&mut self, query: &str, geocoder: &G) -> Result<GeocodeResult, GeocodeError>
    where
        G: Geocoder + ?Sized,
    {
        if let Some(result) = self.lookup(query) {
            debug!(query, "geocode answered locally");
            return Ok(result);
        }

        let key = normalize_query(query);
        if key.is_empty() {
            return Err(GeocodeError::NotFound {
                query: query.to_string(),
            });
        }

        debug!(query = %key, "geocode cache miss");
        match geocoder.forward(&key)? {
            Some(result) => {
                self.entries.insert(key, result.clone());
                Ok(result)
            }
            None => Err(GeocodeError::NotFound {
                query: query.to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Reverse geocode memo keyed by the 5-decimal `lat,lng` string.
#[derive(Debug, Clone, Default)]
pub struct ReverseGeocodeCache {
    labels: HashMap<String, String>,
}

impl ReverseGeocodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never fails: a missing or failed lookup yields the coordinate label.
    /// Only successful lookups are remembered.
    pub fn label_for<G>(&mut self, coordinate: Coordinate, geocoder: &G) -> String
    where
        G: Geocoder + ?Sized,
    {
        let key = coordinate.rounded_key();
        if let Some(label) = self.labels.get(&key) {
            return label.clone();
        }

        match geocoder.reverse(coordinate) {
            Ok(Some(result)) if !result.display_label.trim().is_empty() => {
                self.labels.insert(key, result.display_label.clone());
                result.display_label
            }
            Ok(_) => coordinate.label(),
            Err(err) => {
                warn!(%key, error = %err, "reverse geocode failed, using coordinates");
                coordinate.label()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }
}

/// The caches one planning session owns.
#[derive(Debug, Clone, Default)]
pub struct SessionCaches {
    pub forward: GeocodeCache,
    pub reverse: ReverseGeocodeCache,
}

impl SessionCaches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
    }
}
