//! Optimized-trip response model.
//!
//! Matches the shared shape of the Mapbox optimized-trips and OSRM trip
//! services. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::coords::Coordinate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub trips: Vec<Trip>,
    /// One entry per requested coordinate, in request order.
    #[serde(default)]
    pub waypoints: Vec<ProviderWaypoint>,
}

impl TripResponse {
    pub fn first_trip(&self) -> Option<&Trip> {
        self.trips.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default)]
    pub geometry: LineGeometry,
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

/// GeoJSON `LineString` coordinates, `[lng, lat]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
    #[serde(default)]
    pub annotation: Option<Annotation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub congestion: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderWaypoint {
    pub location: [f64; 2],
    /// Position of this waypoint in the optimized tour.
    pub waypoint_index: usize,
    #[serde(default)]
    pub name: Option<String>,
}

impl ProviderWaypoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::from_lng_lat(self.location)
    }
}

/// Whole-trip totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl TripSummary {
    /// Trip-level totals when the provider reports them, leg sums otherwise.
    pub fn of(trip: &Trip) -> Self {
        let distance_meters = trip
            .distance
            .unwrap_or_else(|| trip.legs.iter().map(|leg| leg.distance).sum());
        let duration_seconds = trip
            .duration
            .unwrap_or_else(|| trip.legs.iter().map(|leg| leg.duration).sum());

        Self {
            distance_meters,
            duration_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAPBOX_BODY: &str = r#"{
        "code": "Ok",
        "waypoints": [
            {"location": [-122.4, 45.5], "waypoint_index": 0, "trips_index": 0, "name": "Main St"},
            {"location": [-122.6, 45.6], "waypoint_index": 2, "trips_index": 0, "name": ""},
            {"location": [-122.5, 45.4], "waypoint_index": 1, "trips_index": 0, "name": "Oak Ave"}
        ],
        "trips": [{
            "geometry": {"type": "LineString", "coordinates": [[-122.4, 45.5], [-122.5, 45.4], [-122.6, 45.6]]},
            "legs": [
                {"distance": 1200.5, "duration": 300.0, "summary": "", "steps": [],
                 "annotation": {"congestion": ["low", "heavy"], "distance": [600.0, 600.5]}},
                {"distance": 800.0, "duration": 200.0, "summary": "", "steps": []}
            ],
            "weight_name": "routability",
            "weight": 510.0,
            "distance": 2000.5,
            "duration": 500.0
        }]
    }"#;

    #[test]
    fn parses_provider_payload() {
        let response: TripResponse = serde_json::from_str(MAPBOX_BODY).unwrap();

        assert_eq!(response.code.as_deref(), Some("Ok"));
        assert_eq!(response.waypoints.len(), 3);
        assert_eq!(response.waypoints[1].waypoint_index, 2);
        assert_eq!(response.waypoints[2].coordinate(), Coordinate::new(-122.5, 45.4));

        let trip = response.first_trip().unwrap();
        assert_eq!(trip.geometry.coordinates.len(), 3);
        assert_eq!(trip.legs.len(), 2);
        assert_eq!(
            trip.legs[0].annotation.as_ref().unwrap().congestion,
            vec!["low", "heavy"]
        );
        assert!(trip.legs[1].annotation.is_none());
    }

    #[test]
    fn summary_prefers_trip_totals() {
        let response: TripResponse = serde_json::from_str(MAPBOX_BODY).unwrap();
        let summary = TripSummary::of(response.first_trip().unwrap());
        assert_eq!(summary.distance_meters, 2000.5);
        assert_eq!(summary.duration_seconds, 500.0);
    }

    #[test]
    fn summary_sums_legs_when_totals_are_missing() {
        let trip = Trip {
            legs: vec![
                Leg {
                    distance: 100.0,
                    duration: 10.0,
                    annotation: None,
                },
                Leg {
                    distance: 250.0,
                    duration: 35.0,
                    annotation: None,
                },
            ],
            ..Trip::default()
        };
        let summary = TripSummary::of(&trip);
        assert_eq!(summary.distance_meters, 350.0);
        assert_eq!(summary.duration_seconds, 45.0);
    }

    #[test]
    fn no_trips_parses_to_empty() {
        let response: TripResponse =
            serde_json::from_str(r#"{"code": "NoTrips", "message": "No trip visiting all destinations possible."}"#)
                .unwrap();
        assert!(response.first_trip().is_none());
        assert!(response.waypoints.is_empty());
    }
}
