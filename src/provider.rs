//! HTTP adapter for geocoding and optimized trips.

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::coords::Coordinate;
use crate::error::ProviderError;
use crate::geocode::GeocodeResult;
use crate::optimize::redact;
use crate::traits::{Geocoder, TripProvider};
use crate::trip::TripResponse;

/// Response codes that mean "valid request, nothing routable".
const NO_ROUTE_CODES: &[&str] = &["NoRoute", "NoTrips", "NoSegment"];

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub access_token: Option<String>,
    /// ISO country codes the forward geocoder is restricted to.
    pub countries: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mapbox.com".to_string(),
            access_token: None,
            countries: vec!["us".to_string()],
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpProvider {
    config: ProviderConfig,
    client: reqwest::blocking::Client,
}

impl HttpProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn places_url(&self, place: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|err| ProviderError::InvalidUrl(format!("{}: {}", self.config.base_url, err)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(["geocoding", "v5", "mapbox.places", format!("{}.json", place).as_str()]);
        Ok(url)
    }

    fn fetch_places(&self, mut url: Url) -> Result<Option<GeocodeResult>, ProviderError> {
        if let Some(token) = &self.config.access_token {
            url.query_pairs_mut().append_pair("access_token", token);
        }

        debug!(url = %redact(url.as_str()), "geocoding request");
        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<PlacesResponse>())?;

        Ok(body.features.into_iter().next().map(|feature| GeocodeResult {
            display_label: feature.place_name,
            coordinate: Coordinate::from_lng_lat(feature.center),
        }))
    }
}

impl Geocoder for HttpProvider {
    fn forward(&self, query: &str) -> Result<Option<GeocodeResult>, ProviderError> {
        let mut url = self.places_url(query)?;
        {
            let mut pairs = url.query_pairs_mut();
            if !self.config.countries.is_empty() {
                pairs.append_pair("country", &self.config.countries.join(","));
            }
            pairs.append_pair("limit", "1");
        }
        self.fetch_places(url)
    }

    fn reverse(&self, coordinate: Coordinate) -> Result<Option<GeocodeResult>, ProviderError> {
        let mut url = self.places_url(&format!("{},{}", coordinate.lng, coordinate.lat))?;
        url.query_pairs_mut().append_pair("limit", "1");
        self.fetch_places(url)
    }
}

impl TripProvider for HttpProvider {
    fn optimized_trip(&self, url: &str) -> Result<TripResponse, ProviderError> {
        debug!(url = %redact(url), "optimized trip request");
        let response = self.client.get(url).send()?;
        let status = response.status();

        let body = match response.json::<TripResponse>() {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(ProviderError::Status {
                    status: status.as_u16(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        classify(body, status.as_u16())
    }
}

fn classify(body: TripResponse, status: u16) -> Result<TripResponse, ProviderError> {
    let code = body.code.clone();
    match code.as_deref() {
        Some("Ok") => Ok(body),
        Some(code) if NO_ROUTE_CODES.contains(&code) => Ok(TripResponse {
            trips: Vec::new(),
            ..body
        }),
        Some(code) => Err(ProviderError::Rejected {
            code: code.to_string(),
            message: body.message.unwrap_or_default(),
        }),
        None if (200..300).contains(&status) => Ok(body),
        None => Err(ProviderError::Status { status }),
    }
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    features: Vec<PlaceFeature>,
}

#[derive(Debug, Deserialize)]
struct PlaceFeature {
    place_name: String,
    center: [f64; 2],
}
