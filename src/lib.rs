//! route-planner core
//!
//! Client-side orchestration for multi-stop route planning: geocoding,
//! stabilization, optimized-trip requests, reconciliation, traffic paint and
//! maps-app export.

pub mod config;
pub mod coords;
pub mod error;
pub mod export;
pub mod extract;
pub mod geocode;
pub mod optimize;
pub mod paint;
pub mod planner;
pub mod polyline;
pub mod provider;
pub mod reconcile;
pub mod session;
pub mod stabilize;
pub mod traits;
pub mod trip;
pub mod usage;
