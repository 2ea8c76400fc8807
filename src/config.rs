//! Planner configuration.

use std::env;

use crate::export::{MapsExport, DEFAULT_MAX_PER_LEG};
use crate::optimize::OptimizationConfig;
use crate::provider::ProviderConfig;

pub const ENV_ACCESS_TOKEN: &str = "MAPBOX_ACCESS_TOKEN";
pub const ENV_BASE_URL: &str = "ROUTE_PLANNER_BASE_URL";
pub const ENV_COUNTRIES: &str = "ROUTE_PLANNER_COUNTRIES";
pub const ENV_TRAFFIC: &str = "ROUTE_PLANNER_TRAFFIC";
pub const ENV_STABILIZE: &str = "ROUTE_PLANNER_STABILIZE";

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub provider: ProviderConfig,
    pub optimization: OptimizationConfig,
    /// Request live and typical trips to color the path by slowdown.
    pub traffic: bool,
    /// Sort destinations by position before optimizing.
    pub stabilize: bool,
    /// Stop ceiling per exported maps link.
    pub max_per_leg: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            optimization: OptimizationConfig::default(),
            traffic: true,
            stabilize: true,
            max_per_leg: DEFAULT_MAX_PER_LEG,
        }
    }
}

impl PlannerConfig {
    /// Defaults overridden by whichever environment variables are set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(token) = lookup(ENV_ACCESS_TOKEN).filter(|t| !t.is_empty()) {
            config.provider.access_token = Some(token.clone());
            config.optimization.access_token = Some(token);
        }
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|u| !u.is_empty()) {
            config.provider.base_url = base_url.clone();
            config.optimization.base_url = base_url;
        }
        if let Some(countries) = lookup(ENV_COUNTRIES) {
            config.provider.countries = countries
                .split(',')
                .map(|code| code.trim().to_lowercase())
                .filter(|code| !code.is_empty())
                .collect();
        }
        if let Some(traffic) = lookup(ENV_TRAFFIC).and_then(|v| parse_flag(&v)) {
            config.traffic = traffic;
        }
        if let Some(stabilize) = lookup(ENV_STABILIZE).and_then(|v| parse_flag(&v)) {
            config.stabilize = stabilize;
        }

        config
    }

    pub fn maps_export(&self) -> MapsExport {
        MapsExport::default().with_max_per_leg(self.max_per_leg)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
