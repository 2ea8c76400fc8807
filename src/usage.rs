//! Plan entitlements and the per-identity usage counter.
//!
//! Gating happens before a run starts and is not part of the pipeline's
//! error path.

use std::collections::HashMap;

use tracing::debug;

use crate::error::GateError;
use crate::planner::RouteInput;
use crate::traits::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entitlements {
    pub is_pro: bool,
    /// Maximum destinations per route.
    pub max_stops: usize,
    /// Optimizations allowed without a pro plan. `None` means unlimited.
    pub free_runs: Option<u32>,
}

impl Entitlements {
    pub fn free(max_stops: usize, free_runs: u32) -> Self {
        Self {
            is_pro: false,
            max_stops,
            free_runs: Some(free_runs),
        }
    }

    pub fn pro(max_stops: usize) -> Self {
        Self {
            is_pro: true,
            max_stops,
            free_runs: None,
        }
    }

    fn plan_name(&self) -> &'static str {
        if self.is_pro { "pro" } else { "free" }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    User(String),
    Guest,
}

impl Identity {
    fn key(&self) -> &str {
        match self {
            Identity::User(id) => id,
            Identity::Guest => "guest",
        }
    }
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

#[derive(Debug)]
pub struct UsageLimiter<S> {
    store: S,
    namespace: String,
    entitlements: Entitlements,
}

impl<S: KeyValueStore> UsageLimiter<S> {
    pub fn new(store: S, identity: &Identity, entitlements: Entitlements) -> Self {
        Self {
            store,
            namespace: format!("{}:{}", identity.key(), entitlements.plan_name()),
            entitlements,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn counter_key(&self) -> String {
        format!("{}:optimizations", self.namespace)
    }

    pub fn runs_used(&self) -> u32 {
        self.store
            .get(&self.counter_key())
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    }

    /// Checked before starting a run.
    pub fn check(&self, input: &RouteInput) -> Result<(), GateError> {
        let requested = input.filled_destinations().len();
        if requested > self.entitlements.max_stops {
            return Err(GateError::TooManyStops {
                requested,
                max: self.entitlements.max_stops,
            });
        }

        if self.entitlements.is_pro {
            return Ok(());
        }
        if let Some(limit) = self.entitlements.free_runs {
            let used = self.runs_used();
            if used >= limit {
                return Err(GateError::UsageLimitExceeded { used, limit });
            }
        }
        Ok(())
    }

    pub fn record_run(&mut self) {
        let used = self.runs_used().saturating_add(1);
        debug!(namespace = %self.namespace, used, "recording optimization");
        let key = self.counter_key();
        self.store.set(&key, used.to_string());
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
