//! Error taxonomy for provider calls, gating and optimize runs.

use std::fmt;

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider responded with status {status}")]
    Status { status: u16 },
    #[error("provider rejected the request ({code}): {message}")]
    Rejected { code: String, message: String },
    #[error("invalid provider url: {0}")]
    InvalidUrl(String),
}

#[derive(thiserror::Error, Debug)]
pub enum GeocodeError {
    #[error("no geocoding result for {query:?}")]
    NotFound { query: String },
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Which user-entered field an address came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Start,
    /// Zero-based index into the destinations as the user entered them.
    Destination(usize),
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressField::Start => write!(f, "start address"),
            AddressField::Destination(index) => write!(f, "destination {}", index + 1),
        }
    }
}

/// Failures that abort one optimize run.
#[derive(thiserror::Error, Debug)]
pub enum PlanError {
    #[error("could not resolve {field} {address:?}: {source}")]
    GeocodeFailure {
        field: AddressField,
        address: String,
        #[source]
        source: GeocodeError,
    },
    #[error("no route found between the given locations")]
    NoRouteFound,
    #[error("a route needs a start and at least one destination")]
    NotEnoughStops,
    #[error(transparent)]
    ProviderRequest(#[from] ProviderError),
    #[error("there is no route to save")]
    NothingToSave,
    #[error("saving route {name:?} failed: {message}")]
    SaveFailed { name: String, message: String },
}

impl PlanError {
    /// The single notification shown for a failed run.
    pub fn user_message(&self) -> String {
        match self {
            PlanError::GeocodeFailure { field, address, .. } => {
                format!("Couldn't find the {}: \"{}\"", field, address)
            }
            PlanError::NoRouteFound => "No route found, try different locations.".to_string(),
            PlanError::NotEnoughStops => {
                "Enter a start address and at least one destination.".to_string()
            }
            PlanError::ProviderRequest(_) => {
                "Route service is unavailable, please try again.".to_string()
            }
            PlanError::NothingToSave => "Optimize a route before saving it.".to_string(),
            PlanError::SaveFailed { name, .. } => format!("Couldn't save \"{}\".", name),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ExportError {
    #[error("invalid maps url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Gating failures, checked before a run starts.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum GateError {
    #[error("usage limit reached: {used} of {limit} optimizations used")]
    UsageLimitExceeded { used: u32, limit: u32 },
    #[error("{requested} destinations requested, plan allows {max}")]
    TooManyStops { requested: usize, max: usize },
}
