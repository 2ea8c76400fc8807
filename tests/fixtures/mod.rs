//! Test fixtures for route-planner.
//!
//! - Real Las Vegas / Henderson places (from OpenStreetMap), routable on the
//!   OSRM Nevada extract
//! - In-process geocoding and optimized-trip providers

pub mod las_vegas_stops;
pub mod providers;

#[allow(unused_imports)]
pub use las_vegas_stops::*;
#[allow(unused_imports)]
pub use providers::*;
