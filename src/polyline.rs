//! Route geometry as decoded coordinates.
//!
//! Providers return GeoJSON `[lng, lat]` pairs; the planner keeps the
//! decoded `(lat, lng)` points the rendering surface draws.

use serde::{Deserialize, Serialize};

use crate::trip::LineGeometry;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn from_geometry(geometry: &LineGeometry) -> Self {
        Self {
            points: geometry
                .coordinates
                .iter()
                .map(|[lng, lat]| (*lat, *lng))
                .collect(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
