//! In-process providers standing in for the geocoding and trip services.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use route_planner::coords::Coordinate;
use route_planner::error::ProviderError;
use route_planner::geocode::{normalize_query, GeocodeResult};
use route_planner::traits::{Geocoder, TripProvider};
use route_planner::trip::{Annotation, Leg, LineGeometry, ProviderWaypoint, Trip, TripResponse};

/// Geocoder backed by a fixed address book.
#[derive(Default)]
pub struct MockGeocoder {
    places: HashMap<String, GeocodeResult>,
    reverse_label: Option<String>,
    unavailable: HashSet<String>,
    pub forward_calls: AtomicUsize,
    pub reverse_calls: AtomicUsize,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, address: &str, lng: f64, lat: f64) -> Self {
        self.places.insert(
            normalize_query(address),
            GeocodeResult {
                display_label: format!("{}, Springfield", address),
                coordinate: Coordinate::new(lng, lat),
            },
        );
        self
    }

    /// Lookups of `address` fail at the provider.
    pub fn with_unavailable(mut self, address: &str) -> Self {
        self.unavailable.insert(normalize_query(address));
        self
    }

    pub fn with_reverse_label(mut self, label: &str) -> Self {
        self.reverse_label = Some(label.to_string());
        self
    }

    pub fn forward_calls(&self) -> usize {
        self.forward_calls.load(Ordering::SeqCst)
    }

    pub fn reverse_calls(&self) -> usize {
        self.reverse_calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for MockGeocoder {
    fn forward(&self, query: &str) -> Result<Option<GeocodeResult>, ProviderError> {
        self.forward_calls.fetch_add(1, Ordering::SeqCst);
        let key = normalize_query(query);
        if self.unavailable.contains(&key) {
            return Err(ProviderError::Status { status: 503 });
        }
        Ok(self.places.get(&key).cloned())
    }

    fn reverse(&self, coordinate: Coordinate) -> Result<Option<GeocodeResult>, ProviderError> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reverse_label.as_ref().map(|label| GeocodeResult {
            display_label: label.clone(),
            coordinate,
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripBehavior {
    /// Keeps the source first and visits the remaining stops in reverse
    /// request order.
    ReverseInterior,
    /// Visits stops in request order.
    RequestOrder,
    NoTrips,
    Unavailable,
}

/// Trip service that answers from the coordinates in the request URL.
pub struct MockTrips {
    behavior: TripBehavior,
    /// Live durations are this multiple of typical durations.
    pub slowdown: f64,
    urls: Mutex<Vec<String>>,
}

impl MockTrips {
    pub fn new(behavior: TripBehavior) -> Self {
        Self {
            behavior,
            slowdown: 1.5,
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn urls(&self) -> Vec<String> {
        let mut urls = self.urls.lock().unwrap().clone();
        urls.sort();
        urls
    }
}

/// `lng,lat;lng,lat` path segment of an optimized-trip URL.
pub fn request_coords(url: &str) -> Vec<Coordinate> {
    let path = url.split('?').next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();
    segment
        .split(';')
        .map(|pair| {
            let mut parts = pair.split(',').map(|v| v.parse::<f64>().unwrap());
            Coordinate::new(parts.next().unwrap(), parts.next().unwrap())
        })
        .collect()
}

impl TripProvider for MockTrips {
    fn optimized_trip(&self, url: &str) -> Result<TripResponse, ProviderError> {
        self.urls.lock().unwrap().push(url.to_string());

        match self.behavior {
            TripBehavior::Unavailable => return Err(ProviderError::Status { status: 503 }),
            TripBehavior::NoTrips => {
                return Ok(TripResponse {
                    code: Some("NoTrips".to_string()),
                    ..TripResponse::default()
                });
            }
            TripBehavior::ReverseInterior | TripBehavior::RequestOrder => {}
        }

        let coords = request_coords(url);
        let n = coords.len();
        let tour_position = |i: usize| match self.behavior {
            TripBehavior::ReverseInterior if i > 0 => n - i,
            _ => i,
        };

        let waypoints: Vec<ProviderWaypoint> = coords
            .iter()
            .enumerate()
            .map(|(i, coord)| ProviderWaypoint {
                location: [coord.lng, coord.lat],
                waypoint_index: tour_position(i),
                name: None,
            })
            .collect();

        let mut visiting = coords.clone();
        for (i, coord) in coords.iter().enumerate() {
            visiting[tour_position(i)] = *coord;
        }

        let live = url.contains("annotations=congestion");
        let legs = (0..n.saturating_sub(1))
            .map(|k| {
                let typical = 100.0 * (k + 1) as f64;
                Leg {
                    distance: 1000.0 * (k + 1) as f64,
                    duration: if live { typical * self.slowdown } else { typical },
                    annotation: live.then(|| Annotation {
                        congestion: vec!["low".to_string(), "severe".to_string()],
                    }),
                }
            })
            .collect();

        Ok(TripResponse {
            code: Some("Ok".to_string()),
            message: None,
            trips: vec![Trip {
                geometry: LineGeometry {
                    coordinates: visiting.iter().map(|c| [c.lng, c.lat]).collect(),
                },
                legs,
                distance: None,
                duration: None,
            }],
            waypoints,
        })
    }
}
