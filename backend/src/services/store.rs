//! Per-session observation state.
//!
//! An [`ObservationStore`] owns the target date, the joined observation set
//! for that date and the selected sensor. It changes through exactly two
//! triggers:
//!
//! - a date change, which fetches both tables, joins them and swaps the
//!   whole set in one assignment;
//! - a point query, which selects the observation nearest to a point.
//!
//! # Stale fetches
//!
//! Fetching may suspend, so two date changes can overlap. Every date change
//! takes a [`RefreshTicket`] stamped with a monotonic generation; when the
//! fetch resolves, its result is applied only if no newer date change has
//! started in the meantime. The underlying fetch is not cancelled, its result
//! is just dropped.
//!
//! ```text
//! begin(D1) ──► gen 1 ─────────── fetch ─────────────► complete → Stale
//! begin(D2) ────────► gen 2 ── fetch ──► complete → Applied
//! ```

use chrono::NaiveDate;
use log::{info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::repository::{
    fetch_tables, RepositoryError, RepositoryResult, SensorDataRepository, SensorTables,
};
use crate::models::{GeoPoint, Observation, SensorId};
use crate::services::join::join;
use crate::services::spatial::{LinearScan, NearestResolver};

/// Errors surfaced by a date change.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The row source failed. The previous observation set is still in place.
    #[error("failed to fetch sensor data for {date}: {source}")]
    FetchFailed {
        date: NaiveDate,
        #[source]
        source: RepositoryError,
    },
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::FetchFailed { source, .. } => source.is_retryable(),
        }
    }
}

/// A fully joined observation set. Never mutated once published.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationSet {
    /// Date the observations belong to; `None` before the first applied refresh.
    pub date: Option<NaiveDate>,
    pub observations: Vec<Observation>,
}

impl ObservationSet {
    pub fn find(&self, sensor_id: &SensorId) -> Option<&Observation> {
        self.observations.iter().find(|o| &o.sensor_id == sensor_id)
    }
}

/// Handle for one in-flight date change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
    date: NaiveDate,
}

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// What happened to the selection when a new set was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionUpdate {
    /// Nothing was selected before.
    Unselected,
    /// The selected sensor is present in the new set and now points at its new values.
    Refreshed,
    /// The selected sensor has no observation in the new set.
    Cleared,
}

/// Result of completing a date change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// The new set replaced the old one.
    Applied {
        date: NaiveDate,
        observations: usize,
        dropped_missing_coordinates: usize,
        selection: SelectionUpdate,
    },
    /// No reading exists for the date; the set is now empty and nothing is selected.
    NoDataForDate { date: NaiveDate },
    /// A newer date change started while this one was fetching; nothing changed.
    Stale { date: NaiveDate },
}

impl RefreshOutcome {
    pub fn date(&self) -> NaiveDate {
        match self {
            RefreshOutcome::Applied { date, .. }
            | RefreshOutcome::NoDataForDate { date }
            | RefreshOutcome::Stale { date } => *date,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, RefreshOutcome::Stale { .. })
    }
}

/// Single-writer state behind one map view.
#[derive(Debug)]
pub struct ObservationStore<R = LinearScan> {
    target_date: Option<NaiveDate>,
    generation: u64,
    current: Arc<ObservationSet>,
    selected: Option<SensorId>,
    resolver: R,
}

impl ObservationStore<LinearScan> {
    pub fn new() -> Self {
        Self::with_resolver(LinearScan)
    }
}

impl Default for ObservationStore<LinearScan> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: NearestResolver> ObservationStore<R> {
    /// Create an empty store that resolves point queries with `resolver`.
    pub fn with_resolver(resolver: R) -> Self {
        Self {
            target_date: None,
            generation: 0,
            current: Arc::new(ObservationSet::default()),
            selected: None,
            resolver,
        }
    }

    /// Most recently requested date, whether or not its data has arrived.
    pub fn target_date(&self) -> Option<NaiveDate> {
        self.target_date
    }

    /// The current set. Readers keep a consistent view even if a refresh
    /// lands while they hold it.
    pub fn snapshot(&self) -> Arc<ObservationSet> {
        Arc::clone(&self.current)
    }

    pub fn observations(&self) -> &[Observation] {
        &self.current.observations
    }

    pub fn selected_id(&self) -> Option<&SensorId> {
        self.selected.as_ref()
    }

    /// The selected observation, taken from the current set.
    pub fn selected(&self) -> Option<&Observation> {
        self.selected.as_ref().and_then(|id| self.current.find(id))
    }

    /// Start a date change. Any ticket issued earlier becomes stale.
    pub fn begin_refresh(&mut self, date: NaiveDate) -> RefreshTicket {
        self.generation += 1;
        self.target_date = Some(date);
        RefreshTicket {
            generation: self.generation,
            date,
        }
    }

    /// Finish a date change with the fetched tables.
    ///
    /// A stale ticket is discarded whatever the fetch returned. A failed fetch
    /// leaves the current set and selection untouched.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        fetched: RepositoryResult<SensorTables>,
    ) -> Result<RefreshOutcome, StoreError> {
        if ticket.generation != self.generation {
            warn!(
                "discarding stale sensor data for {} (requested {:?})",
                ticket.date, self.target_date
            );
            return Ok(RefreshOutcome::Stale { date: ticket.date });
        }

        let tables = fetched.map_err(|source| StoreError::FetchFailed {
            date: ticket.date,
            source,
        })?;

        let outcome = join(&tables.locations, &tables.readings, ticket.date);
        if outcome.no_data_for_date() {
            warn!("no sensor data found for {}", ticket.date);
            self.current = Arc::new(ObservationSet {
                date: Some(ticket.date),
                observations: Vec::new(),
            });
            self.selected = None;
            return Ok(RefreshOutcome::NoDataForDate { date: ticket.date });
        }

        let observations = outcome.observations.len();
        self.current = Arc::new(ObservationSet {
            date: Some(ticket.date),
            observations: outcome.observations,
        });
        let selection = self.revalidate_selection();

        info!(
            "applied {} observations for {} (selection {:?})",
            observations, ticket.date, selection
        );
        Ok(RefreshOutcome::Applied {
            date: ticket.date,
            observations,
            dropped_missing_coordinates: outcome.dropped_missing_coordinates,
            selection,
        })
    }

    fn revalidate_selection(&mut self) -> SelectionUpdate {
        let Some(id) = self.selected.as_ref() else {
            return SelectionUpdate::Unselected;
        };
        if self.current.find(id).is_some() {
            SelectionUpdate::Refreshed
        } else {
            warn!("selected sensor {} is not available for the new date", id);
            self.selected = None;
            SelectionUpdate::Cleared
        }
    }

    /// Change the target date, fetch, join and apply.
    ///
    /// For a store with a single owner; see [`refresh_shared`] when the store
    /// sits behind a lock.
    pub async fn on_date_change(
        &mut self,
        repo: &dyn SensorDataRepository,
        date: NaiveDate,
    ) -> Result<RefreshOutcome, StoreError> {
        let ticket = self.begin_refresh(date);
        let fetched = fetch_tables(repo).await;
        self.complete_refresh(ticket, fetched)
    }

    /// Select the observation nearest to `point` in the current set.
    ///
    /// Returns the new selection, or `None` (selection unchanged) when the
    /// set is empty.
    pub fn on_point_query(&mut self, point: GeoPoint) -> Option<&Observation> {
        let id = self
            .resolver
            .nearest(point, &self.current.observations)?
            .sensor_id
            .clone();
        self.selected = Some(id);
        self.selected()
    }
}

/// Run a date change on a store shared behind a mutex.
///
/// The lock is held only to take the ticket and to apply the result, never
/// across the fetch, so point queries keep working while data loads.
pub async fn refresh_shared<R: NearestResolver>(
    store: &Mutex<ObservationStore<R>>,
    repo: &dyn SensorDataRepository,
    date: NaiveDate,
) -> Result<RefreshOutcome, StoreError> {
    let ticket = store.lock().begin_refresh(date);
    let fetched = fetch_tables(repo).await;
    store.lock().complete_refresh(ticket, fetched)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
