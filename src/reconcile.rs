//! Maps the provider's tour back onto the user's stops.

use serde::{Deserialize, Serialize};

use crate::coords::is_coordinate_pair;
use crate::geocode::ReverseGeocodeCache;
use crate::traits::Geocoder;
use crate::trip::{Leg, ProviderWaypoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopRole {
    Start,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegMetrics {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl From<&Leg> for LegMetrics {
    fn from(leg: &Leg) -> Self {
        Self {
            distance_meters: leg.distance,
            duration_seconds: leg.duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedStop {
    pub order: usize,
    pub role: StopRole,
    pub label: String,
    /// What the user typed for this stop, when they typed anything.
    pub typed_label: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub to_next: Option<LegMetrics>,
}

/// Labels that need a reverse lookup before they can be shown.
fn needs_reverse_lookup(label: &str) -> bool {
    let label = label.trim();
    label.is_empty() || is_coordinate_pair(label)
}

/// `waypoints` are in request order, so an entry's array position is its
/// stable index into `labels`. The visiting order is `waypoint_index`.
pub fn reconcile<G>(
    waypoints: &[ProviderWaypoint],
    legs: &[Leg],
    labels: &[String],
    reverse: &mut ReverseGeocodeCache,
    geocoder: &G,
) -> Vec<OrderedStop>
where
    G: Geocoder + ?Sized,
{
    let mut visiting: Vec<(usize, &ProviderWaypoint)> = waypoints.iter().enumerate().collect();
    visiting.sort_by_key(|(stable, waypoint)| (waypoint.waypoint_index, *stable));

    visiting
        .into_iter()
        .enumerate()
        .map(|(order, (stable, waypoint))| {
            let coordinate = waypoint.coordinate();
            let typed = labels
                .get(stable)
                .map(|label| label.trim())
                .filter(|label| !label.is_empty());

            let label = match typed {
                Some(text) if !needs_reverse_lookup(text) => text.to_string(),
                _ => reverse.label_for(coordinate, geocoder),
            };

            OrderedStop {
                order,
                role: if order == 0 {
                    StopRole::Start
                } else {
                    StopRole::Stop
                },
                label,
                typed_label: typed.map(str::to_string),
                lat: coordinate.lat,
                lng: coordinate.lng,
                to_next: legs.get(order).map(LegMetrics::from),
            }
        })
        .collect()
}
