//! The planning session: caches, the displayed route and run sequencing.
//!
//! Runs are numbered when they start. Only the newest run may replace the
//! displayed route; anything older that finishes late is dropped, and a
//! failed run never clears what is already shown.

use tracing::{info, warn};

use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::geocode::SessionCaches;
use crate::planner::{plan_route, PlannedRoute, RouteInput};
use crate::reconcile::OrderedStop;
use crate::traits::{Geocoder, TripProvider};

/// Identifies one optimize run within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunTicket(u64);

impl RunTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    /// A newer run was started; this outcome was discarded.
    Stale,
}

#[derive(Debug, Default)]
pub struct PlanningSession {
    caches: SessionCaches,
    current: Option<PlannedRoute>,
    issued: u64,
}

impl PlanningSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_run(&mut self) -> RunTicket {
        self.issued += 1;
        RunTicket(self.issued)
    }

    pub fn is_latest(&self, ticket: RunTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Applies a finished run. Stale outcomes are dropped whether they
    /// succeeded or failed; a failure of the latest run is returned and
    /// leaves the displayed route untouched.
    pub fn commit(
        &mut self,
        ticket: RunTicket,
        outcome: Result<PlannedRoute, PlanError>,
    ) -> Result<Commit, PlanError> {
        if !self.is_latest(ticket) {
            warn!(run = ticket.0, latest = self.issued, "discarding stale optimize run");
            return Ok(Commit::Stale);
        }

        let route = outcome?;
        info!(run = ticket.0, stops = route.stops.len(), "route committed");
        self.current = Some(route);
        Ok(Commit::Applied)
    }

    /// Starts, runs and commits one optimization.
    pub fn optimize<G, T>(
        &mut self,
        input: &RouteInput,
        geocoder: &G,
        trips: &T,
        config: &PlannerConfig,
    ) -> Result<Commit, PlanError>
    where
        G: Geocoder + Sync + ?Sized,
        T: TripProvider + Sync + ?Sized,
    {
        let ticket = self.begin_run();
        let outcome = plan_route(input, &mut self.caches, geocoder, trips, config);
        self.commit(ticket, outcome)
    }

    pub fn current(&self) -> Option<&PlannedRoute> {
        self.current.as_ref()
    }

    pub fn caches(&self) -> &SessionCaches {
        &self.caches
    }

    pub fn caches_mut(&mut self) -> &mut SessionCaches {
        &mut self.caches
    }

    /// New route: drops the displayed route and everything cached. Runs
    /// still in flight become stale.
    pub fn reset(&mut self) {
        self.caches.clear();
        self.current = None;
        self.issued += 1;
    }

    /// Hands the displayed stops to an external save-route callback.
    pub fn save_current<F, E>(&self, name: &str, save: F) -> Result<(), PlanError>
    where
        F: FnOnce(&str, &[OrderedStop]) -> Result<(), E>,
        E: std::fmt::Display,
    {
        let route = self.current.as_ref().ok_or(PlanError::NothingToSave)?;
        save(name, &route.stops).map_err(|err| PlanError::SaveFailed {
            name: name.to_string(),
            message: err.to_string(),
        })
    }
}
