//! Deterministic destination ordering ahead of optimization.
//!
//! The provider's tour can depend on input order when costs tie, so sorting
//! destinations by position removes entry order as a source of variation.

use std::cmp::Ordering;

use crate::coords::Coordinate;

/// Coordinates and labels in request order. `labels[i]` belongs to `coords[i]`
/// and index 0 is always the start.
#[derive(Debug, Clone, PartialEq)]
pub struct StabilizedStops {
    pub coords: Vec<Coordinate>,
    pub labels: Vec<String>,
}

/// A resolved stop with the text the user typed for it.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledCoordinate {
    pub coordinate: Coordinate,
    pub label: String,
}

fn by_lng_then_lat(a: &Coordinate, b: &Coordinate) -> Ordering {
    a.lng.total_cmp(&b.lng).then_with(|| a.lat.total_cmp(&b.lat))
}

pub fn stabilize(
    start: LabeledCoordinate,
    destinations: Vec<LabeledCoordinate>,
    enabled: bool,
) -> StabilizedStops {
    let mut ordered = destinations;
    if enabled {
        ordered.sort_by(|a, b| {
            by_lng_then_lat(&a.coordinate, &b.coordinate).then_with(|| a.label.cmp(&b.label))
        });
    }

    let mut coords = Vec::with_capacity(ordered.len() + 1);
    let mut labels = Vec::with_capacity(ordered.len() + 1);
    coords.push(start.coordinate);
    labels.push(start.label);
    for stop in ordered {
        coords.push(stop.coordinate);
        labels.push(stop.label);
    }

    StabilizedStops { coords, labels }
}
