//! Optimized-trip request construction.

use tracing::debug;

use crate::coords::Coordinate;
use crate::error::PlanError;

/// URL layout of the optimization service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderDialect {
    /// `/optimized-trips/v1/<profile>/<coords>` with an access token.
    Mapbox,
    /// Self-hosted `/trip/v1/<profile>/<coords>`.
    Osrm,
}

/// The URLs for one optimize run. Without traffic accounting there is only
/// the live request; it stands in for the typical trip and its congestion
/// annotations drive the paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationRequests {
    pub live_url: String,
    pub typical_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OptimizationConfig {
    pub base_url: String,
    pub dialect: ProviderDialect,
    /// Traffic-aware profile used for the live trip.
    pub live_profile: String,
    /// Traffic-agnostic profile used for the typical trip.
    pub typical_profile: String,
    pub access_token: Option<String>,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mapbox.com".to_string(),
            dialect: ProviderDialect::Mapbox,
            live_profile: "mapbox/driving-traffic".to_string(),
            typical_profile: "mapbox/driving".to_string(),
            access_token: None,
        }
    }
}

impl OptimizationConfig {
    /// Configuration for a local `osrm-routed` instance.
    pub fn osrm(base_url: impl Into<String>, profile: impl Into<String>) -> Self {
        let profile = profile.into();
        Self {
            base_url: base_url.into(),
            dialect: ProviderDialect::Osrm,
            live_profile: profile.clone(),
            typical_profile: profile,
            access_token: None,
        }
    }

    /// `coords[0]` is the fixed source and the last coordinate the fixed
    /// destination; interior stops may be reordered freely.
    pub fn build_requests(
        &self,
        coords: &[Coordinate],
        traffic_enabled: bool,
    ) -> Result<OptimizationRequests, PlanError> {
        if coords.len() < 2 {
            return Err(PlanError::NotEnoughStops);
        }

        let path = coords
            .iter()
            .map(Coordinate::path_token)
            .collect::<Vec<_>>()
            .join(";");

        let requests = OptimizationRequests {
            live_url: self.url(&self.live_profile, &path, Some(self.traffic_annotations())),
            typical_url: traffic_enabled.then(|| self.url(&self.typical_profile, &path, None)),
        };

        debug!(
            stops = coords.len(),
            traffic_enabled,
            live = %redact(&requests.live_url),
            "built optimization requests"
        );
        Ok(requests)
    }

    fn traffic_annotations(&self) -> &'static str {
        match self.dialect {
            ProviderDialect::Mapbox => "congestion,distance,duration",
            ProviderDialect::Osrm => "distance,duration",
        }
    }

    fn url(&self, profile: &str, path: &str, annotations: Option<&str>) -> String {
        let service = match self.dialect {
            ProviderDialect::Mapbox => "optimized-trips/v1",
            ProviderDialect::Osrm => "trip/v1",
        };

        let mut url = format!(
            "{}/{}/{}/{}?source=first&destination=last&roundtrip=false&geometries=geojson&overview=full",
            self.base_url.trim_end_matches('/'),
            service,
            profile,
            path
        );
        if let Some(annotations) = annotations {
            url.push_str("&annotations=");
            url.push_str(annotations);
        }
        if let Some(token) = &self.access_token {
            url.push_str("&access_token=");
            url.push_str(token);
        }
        url
    }
}

/// Strips the access token for logging.
pub(crate) fn redact(url: &str) -> String {
    match url.find("access_token=") {
        Some(pos) => format!("{}access_token=***", &url[..pos]),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> Vec<Coordinate> {
        vec![
            Coordinate::new(-122.4, 45.5),
            Coordinate::new(-122.5, 45.4),
            Coordinate::new(-122.6, 45.6),
        ]
    }

    #[test]
    fn traffic_builds_live_and_typical() {
        let config = OptimizationConfig {
            access_token: Some("pk.test".to_string()),
            ..OptimizationConfig::default()
        };

        let requests = config.build_requests(&coords(), true).unwrap();

        assert_eq!(
            requests.live_url,
            "https://api.mapbox.com/optimized-trips/v1/mapbox/driving-traffic/\
             -122.400000,45.500000;-122.500000,45.400000;-122.600000,45.600000\
             ?source=first&destination=last&roundtrip=false&geometries=geojson&overview=full\
             &annotations=congestion,distance,duration&access_token=pk.test"
        );
        let typical = requests.typical_url.unwrap();
        assert!(typical.contains("/optimized-trips/v1/mapbox/driving/"));
        assert!(!typical.contains("annotations="));
        assert!(typical.ends_with("&access_token=pk.test"));
    }

    #[test]
    fn without_traffic_a_single_annotated_request_suffices() {
        let requests = OptimizationConfig::default()
            .build_requests(&coords(), false)
            .unwrap();
        assert!(requests.typical_url.is_none());
        assert!(requests.live_url.contains("/mapbox/driving-traffic/"));
        assert!(requests.live_url.ends_with("&annotations=congestion,distance,duration"));
    }

    #[test]
    fn osrm_single_request_skips_congestion() {
        let config = OptimizationConfig::osrm("http://127.0.0.1:5000", "car");
        let requests = config.build_requests(&coords(), false).unwrap();
        assert!(requests.typical_url.is_none());
        assert!(requests.live_url.ends_with("&annotations=distance,duration"));
    }

    #[test]
    fn osrm_dialect_uses_trip_service() {
        let config = OptimizationConfig::osrm("http://127.0.0.1:5000/", "car");
        let requests = config.build_requests(&coords()[..2], true).unwrap();
        assert!(requests.live_url.starts_with(
            "http://127.0.0.1:5000/trip/v1/car/-122.400000,45.500000;-122.500000,45.400000?"
        ));
        assert!(requests.live_url.ends_with("&annotations=distance,duration"));
        assert!(!requests.live_url.contains("access_token"));
    }

    #[test]
    fn needs_two_coordinates() {
        let err = OptimizationConfig::default()
            .build_requests(&coords()[..1], false)
            .unwrap_err();
        assert!(matches!(err, PlanError::NotEnoughStops));
    }

    #[test]
    fn redacts_token() {
        assert_eq!(redact("https://x/y?a=1&access_token=secret"), "https://x/y?a=1&access_token=***");
        assert_eq!(redact("https://x/y?a=1"), "https://x/y?a=1");
    }
}
