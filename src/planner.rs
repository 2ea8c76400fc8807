//! One optimize run, from typed addresses to an ordered, painted route.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::PlannerConfig;
use crate::error::{AddressField, GeocodeError, PlanError};
use crate::export::MapsExport;
use crate::geocode::{normalize_query, GeocodeCache, GeocodeResult, SessionCaches};
use crate::paint::{map_to_paint, ColorRamp};
use crate::polyline::Polyline;
use crate::reconcile::{reconcile, OrderedStop};
use crate::stabilize::{stabilize, LabeledCoordinate};
use crate::traits::{Geocoder, TripProvider};
use crate::trip::TripSummary;

/// What the user typed: a start and destinations in entry order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteInput {
    pub start: String,
    pub destinations: Vec<String>,
}

impl RouteInput {
    pub fn new(start: impl Into<String>, destinations: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            start: start.into(),
            destinations: destinations.into_iter().map(Into::into).collect(),
        }
    }

    /// Non-blank destinations with their entry index.
    pub fn filled_destinations(&self) -> Vec<(usize, &str)> {
        self.destinations
            .iter()
            .enumerate()
            .map(|(index, text)| (index, text.trim()))
            .filter(|(_, text)| !text.is_empty())
            .collect()
    }

    /// Start plus non-blank destinations.
    pub fn stop_count(&self) -> usize {
        1 + self.filled_destinations().len()
    }
}

/// The result of a successful run. Replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedRoute {
    pub stops: Vec<OrderedStop>,
    pub summary: TripSummary,
    pub geometry: Polyline,
    /// `None` keeps the renderer's static gradient.
    pub paint: Option<ColorRamp>,
}

impl PlannedRoute {
    pub fn export_links(&self, export: &MapsExport) -> Vec<String> {
        export.links(&self.stops)
    }
}

fn geocode_failure(field: AddressField, address: &str, err: GeocodeError) -> PlanError {
    match err {
        GeocodeError::Provider(provider) => PlanError::ProviderRequest(provider),
        source => PlanError::GeocodeFailure {
            field,
            address: address.to_string(),
            source,
        },
    }
}

/// Resolves destinations, fetching distinct cache misses in parallel.
/// Results stay aligned with `entries`; the first failure in entry order is
/// the one reported.
fn resolve_destinations<G>(
    entries: &[(usize, &str)],
    cache: &mut GeocodeCache,
    geocoder: &G,
) -> Result<Vec<GeocodeResult>, PlanError>
where
    G: Geocoder + Sync + ?Sized,
{
    let mut seen = HashSet::new();
    let pending: Vec<String> = entries
        .iter()
        .filter(|(_, text)| cache.lookup(text).is_none())
        .map(|(_, text)| normalize_query(text))
        .filter(|key| seen.insert(key.clone()))
        .collect();

    debug!(
        destinations = entries.len(),
        misses = pending.len(),
        "resolving destinations"
    );

    let fetched: Vec<_> = pending
        .into_par_iter()
        .map(|key| {
            let result = geocoder.forward(&key);
            (key, result)
        })
        .collect();

    let mut failures: HashMap<String, GeocodeError> = HashMap::new();
    for (key, result) in fetched {
        match result {
            Ok(Some(found)) => cache.insert(&key, found),
            Ok(None) => {
                failures.insert(key.clone(), GeocodeError::NotFound { query: key });
            }
            Err(err) => {
                failures.insert(key, GeocodeError::Provider(err));
            }
        }
    }

    let mut resolved = Vec::with_capacity(entries.len());
    for &(index, text) in entries {
        if let Some(found) = cache.lookup(text) {
            resolved.push(found);
            continue;
        }
        let err = failures
            .remove(&normalize_query(text))
            .unwrap_or_else(|| GeocodeError::NotFound {
                query: text.to_string(),
            });
        return Err(geocode_failure(AddressField::Destination(index), text, err));
    }
    Ok(resolved)
}

/// Runs the full pipeline. Pure with respect to displayed state: callers
/// decide whether to commit the result.
pub fn plan_route<G, T>(
    input: &RouteInput,
    caches: &mut SessionCaches,
    geocoder: &G,
    trips: &T,
    config: &PlannerConfig,
) -> Result<PlannedRoute, PlanError>
where
    G: Geocoder + Sync + ?Sized,
    T: TripProvider + Sync + ?Sized,
{
    let start_text = input.start.trim();
    let entries = input.filled_destinations();
    if start_text.is_empty() || entries.is_empty() {
        return Err(PlanError::NotEnoughStops);
    }

    info!(
        destinations = entries.len(),
        traffic = config.traffic,
        stabilize = config.stabilize,
        "optimizing route"
    );

    let start = caches
        .forward
        .resolve(start_text, geocoder)
        .map_err(|err| geocode_failure(AddressField::Start, start_text, err))?;
    let destinations = resolve_destinations(&entries, &mut caches.forward, geocoder)?;

    let stabilized = stabilize(
        LabeledCoordinate {
            coordinate: start.coordinate,
            label: start_text.to_string(),
        },
        destinations
            .iter()
            .zip(&entries)
            .map(|(result, (_, text))| LabeledCoordinate {
                coordinate: result.coordinate,
                label: text.to_string(),
            })
            .collect(),
        config.stabilize,
    );

    let requests = config
        .optimization
        .build_requests(&stabilized.coords, config.traffic)?;

    let (live, typical) = rayon::join(
        || trips.optimized_trip(&requests.live_url),
        || requests.typical_url.as_deref().map(|url| trips.optimized_trip(url)),
    );
    let live = live?;
    let typical = typical.transpose()?;

    let live_trip = live.first_trip().ok_or(PlanError::NoRouteFound)?;
    if live.waypoints.len() < 2 {
        return Err(PlanError::NoRouteFound);
    }
    let typical_trip = typical.as_ref().and_then(|response| response.first_trip());

    let stops = reconcile(
        &live.waypoints,
        &live_trip.legs,
        &stabilized.labels,
        &mut caches.reverse,
        geocoder,
    );
    let summary = TripSummary::of(live_trip);

    info!(
        stops = stops.len(),
        distance_meters = summary.distance_meters,
        duration_seconds = summary.duration_seconds,
        "route optimized"
    );

    Ok(PlannedRoute {
        stops,
        summary,
        geometry: Polyline::from_geometry(&live_trip.geometry),
        paint: map_to_paint(live_trip, typical_trip),
    })
}
