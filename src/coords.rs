//! Coordinates and the literal `"lat, lng"` address form.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static COORDINATE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?[0-9]{1,2}\.[0-9]+),\s*(-?[0-9]{1,3}\.[0-9]+)$").expect("coordinate pattern compiles")
});

/// A WGS84 position. Stored in provider order (longitude first).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// `[lng, lat]` as used in provider payloads.
    pub fn from_lng_lat(pair: [f64; 2]) -> Self {
        Self {
            lng: pair[0],
            lat: pair[1],
        }
    }

    /// Request path form, `lng,lat`.
    pub fn path_token(&self) -> String {
        format!("{:.6},{:.6}", self.lng, self.lat)
    }

    /// Human fallback label, `lat, lng` at five decimals.
    pub fn label(&self) -> String {
        format!("{:.5}, {:.5}", self.lat, self.lng)
    }

    /// Cache key for reverse lookups, `lat,lng` at five decimals.
    pub fn rounded_key(&self) -> String {
        format!("{:.5},{:.5}", self.lat, self.lng)
    }

    /// Export form understood by maps apps, `lat,lng`.
    pub fn export_token(&self) -> String {
        format!("{:.6},{:.6}", self.lat, self.lng)
    }
}

/// A coordinate typed directly by the user, with the text it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedCoordinate {
    pub coordinate: Coordinate,
    /// `"<lat>, <lng>"` using the digits exactly as typed.
    pub display: String,
}

/// Parses the strict `lat, lng` decimal pair. Anything else is an address.
pub fn parse_coordinate_pair(input: &str) -> Option<TypedCoordinate> {
    let captures = COORDINATE_PAIR.captures(input.trim())?;
    let lat_text = captures.get(1)?.as_str();
    let lng_text = captures.get(2)?.as_str();
    let lat = lat_text.parse::<f64>().ok()?;
    let lng = lng_text.parse::<f64>().ok()?;

    Some(TypedCoordinate {
        coordinate: Coordinate::new(lng, lat),
        display: format!("{}, {}", lat_text, lng_text),
    })
}

pub fn is_coordinate_pair(input: &str) -> bool {
    COORDINATE_PAIR.is_match(input.trim())
}
