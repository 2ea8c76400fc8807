//! Seeding route input from AI address extraction.
//!
//! Only the output shape matters here; the extraction backend itself is an
//! external collaborator and its failures never reach the planner.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::planner::RouteInput;
use crate::traits::AddressExtractor;

/// A saved place offered to the extractor as context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub label: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedAddress {
    pub address: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "isStart", default)]
    pub is_start: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    #[serde(default)]
    pub addresses: Vec<ExtractedAddress>,
}

impl Extraction {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// The first entry flagged as start becomes the start; without one the
    /// current start is kept, or the first address is used when that is
    /// blank. Everything else becomes a destination in extraction order.
    pub fn into_input(self, current: &RouteInput) -> RouteInput {
        let mut addresses: Vec<ExtractedAddress> = self
            .addresses
            .into_iter()
            .filter(|entry| !entry.address.trim().is_empty())
            .collect();

        let start = match addresses.iter().position(|entry| entry.is_start) {
            Some(index) => addresses.remove(index).address,
            None if !current.start.trim().is_empty() => current.start.clone(),
            None if !addresses.is_empty() => addresses.remove(0).address,
            None => String::new(),
        };

        RouteInput {
            start: start.trim().to_string(),
            destinations: addresses
                .into_iter()
                .map(|entry| entry.address.trim().to_string())
                .collect(),
        }
    }
}

/// Replaces `current` with the extraction result, or keeps it when the
/// extraction failed or found nothing.
pub fn seed_input<E>(current: RouteInput, extracted: Result<Extraction, E>) -> RouteInput
where
    E: std::fmt::Display,
{
    match extracted {
        Ok(extraction) if extraction.addresses.is_empty() => {
            debug!("extraction found no addresses");
            current
        }
        Ok(extraction) => {
            let seeded = extraction.into_input(&current);
            debug!(destinations = seeded.destinations.len(), "seeded route input");
            seeded
        }
        Err(err) => {
            warn!(error = %err, "address extraction failed, keeping current input");
            current
        }
    }
}

/// Runs `extractor` over `text` and seeds the input from its output.
pub fn extract_into<X>(
    extractor: &X,
    text: &str,
    bookmarks: &[Bookmark],
    current: RouteInput,
) -> RouteInput
where
    X: AddressExtractor + ?Sized,
{
    seed_input(current, extractor.extract(text, bookmarks))
}
