//! Deep links into an external maps app.
//!
//! Maps apps cap the number of stops one directions link may carry, so long
//! routes are split into overlapping windows: each link starts where the
//! previous one ended.

use reqwest::Url;

use crate::coords::{is_coordinate_pair, Coordinate};
use crate::error::ExportError;
use crate::reconcile::OrderedStop;

pub const GOOGLE_MAPS_DIR_URL: &str = "https://www.google.com/maps/dir/";

/// Origin and destination plus nine waypoints.
pub const DEFAULT_MAX_PER_LEG: usize = 11;

#[derive(Debug, Clone)]
pub struct MapsExport {
    base: Url,
    travel_mode: String,
    max_per_leg: usize,
}

impl Default for MapsExport {
    fn default() -> Self {
        Self {
            base: Url::parse(GOOGLE_MAPS_DIR_URL).expect("static maps url parses"),
            travel_mode: "driving".to_string(),
            max_per_leg: DEFAULT_MAX_PER_LEG,
        }
    }
}

impl MapsExport {
    pub fn new(
        base_url: &str,
        travel_mode: impl Into<String>,
        max_per_leg: usize,
    ) -> Result<Self, ExportError> {
        let base = Url::parse(base_url).map_err(|err| ExportError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            base,
            travel_mode: travel_mode.into(),
            max_per_leg,
        })
    }

    pub fn with_max_per_leg(mut self, max_per_leg: usize) -> Self {
        self.max_per_leg = max_per_leg;
        self
    }

    pub fn max_per_leg(&self) -> usize {
        self.max_per_leg.max(2)
    }

    /// One link per window. An empty route yields a single empty link.
    pub fn links(&self, stops: &[OrderedStop]) -> Vec<String> {
        if stops.is_empty() {
            return vec![String::new()];
        }

        let tokens: Vec<String> = stops.iter().map(stop_token).collect();
        split_windows(tokens.len(), self.max_per_leg())
            .into_iter()
            .map(|(start, end)| self.link(&tokens[start..end]))
            .collect()
    }

    fn link(&self, window: &[String]) -> String {
        let origin = &window[0];
        let destination = &window[window.len() - 1];
        let interior: &[String] = if window.len() > 2 {
            &window[1..window.len() - 1]
        } else {
            &[]
        };

        let mut url = self.base.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("api", "1")
                .append_pair("origin", origin)
                .append_pair("destination", destination)
                .append_pair("travelmode", &self.travel_mode);
            if !interior.is_empty() {
                query.append_pair("waypoints", &interior.join("|"));
            }
        }
        url.into()
    }
}

/// Typed address when there is one, coordinates otherwise.
fn stop_token(stop: &OrderedStop) -> String {
    match stop.typed_label.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() && !is_coordinate_pair(label) => label.to_string(),
        _ => Coordinate::new(stop.lng, stop.lat).export_token(),
    }
}

/// `[start, end)` windows of at most `max` items; consecutive windows share
/// one boundary item.
fn split_windows(len: usize, max: usize) -> Vec<(usize, usize)> {
    if len <= max {
        return vec![(0, len)];
    }

    let mut windows = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + max).min(len);
        windows.push((start, end));
        if end == len {
            break;
        }
        start = end - 1;
    }
    windows
}

pub fn build_export_links(stops: &[OrderedStop], max_per_leg: usize) -> Vec<String> {
    MapsExport::default().with_max_per_leg(max_per_leg).links(stops)
}
