// The view state controller owns the session's current window and filter and
// coordinates aggregation around them.
//
// Purpose
// - Single writer for week, filter, summaries, stats, loading, error, and
//   connection state. All mutation goes through its async operations.
//
// Responsibilities
// - Invalidate superseded aggregations with a monotonic generation counter:
//   a result whose generation is no longer current is dropped, never merged.
// - Keep last-good summaries visible when a fetch fails.
// - Re-pivot resident raw data on a filter change instead of refetching.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::application::aggregator::{WeekAggregator, WeekData};
use crate::application::errors::DashboardError;
use crate::application::listener::{ConnectionState, FeedSink};
use crate::core::ports::{EntryRepository, RosterRepository, TransportError};
use crate::core::roster::EmployeeFilter;
use crate::core::stats::AggregateStats;
use crate::core::summary::WeeklySummary;
use crate::core::week::Week;

/// Read-only snapshot handed to the surrounding UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub week_start: NaiveDate,
    pub week_end_exclusive: NaiveDate,
    pub employee_filter: Option<String>,
    pub summaries: Vec<WeeklySummary>,
    pub stats: AggregateStats,
    pub loading: bool,
    pub error: Option<String>,
    pub connection_state: ConnectionState,
}

struct ViewState {
    week: Week,
    filter: EmployeeFilter,
    summaries: Vec<WeeklySummary>,
    stats: AggregateStats,
    loading: bool,
    error: Option<String>,
    connection: ConnectionState,
    resident: Option<WeekData>,
}

pub struct DashboardController<TRoster, TEntries>
where
    TRoster: RosterRepository,
    TEntries: EntryRepository,
{
    aggregator: WeekAggregator<TRoster, TEntries>,
    generation: AtomicU64,
    state: RwLock<ViewState>,
}

impl<TRoster, TEntries> DashboardController<TRoster, TEntries>
where
    TRoster: RosterRepository,
    TEntries: EntryRepository,
{
    pub fn new(
        roster_repository: Arc<TRoster>,
        entry_repository: Arc<TEntries>,
        initial_week: Week,
    ) -> Self {
        Self {
            aggregator: WeekAggregator::new(roster_repository, entry_repository),
            generation: AtomicU64::new(0),
            state: RwLock::new(ViewState {
                week: initial_week,
                filter: EmployeeFilter::All,
                summaries: Vec::new(),
                stats: AggregateStats::default(),
                loading: false,
                error: None,
                connection: ConnectionState::Disconnected,
                resident: None,
            }),
        }
    }

    pub async fn snapshot(&self) -> DashboardView {
        let state = self.state.read().await;
        DashboardView {
            week_start: state.week.start(),
            week_end_exclusive: state.week.end_exclusive(),
            employee_filter: state.filter.as_option().map(str::to_string),
            summaries: state.summaries.clone(),
            stats: state.stats,
            loading: state.loading,
            error: state.error.clone(),
            connection_state: state.connection,
        }
    }

    /// Moves the view to the week containing `date` and re-aggregates. Any
    /// in-flight aggregation for the old window is superseded.
    pub async fn set_week(&self, date: NaiveDate) {
        {
            let mut state = self.state.write().await;
            state.week = Week::containing(date);
        }
        self.refresh().await;
    }

    pub async fn navigate_week(&self, delta_weeks: i64) {
        {
            let mut state = self.state.write().await;
            state.week = state.week.shift(delta_weeks);
        }
        self.refresh().await;
    }

    /// Re-pivots resident raw data when it still covers the current window;
    /// refetches otherwise. Either way the in-flight aggregation, if any, is
    /// superseded so a stale result cannot overwrite the new filter's view.
    pub async fn set_employee_filter(&self, employee_id: Option<String>) {
        let filter = EmployeeFilter::from_option(employee_id);
        let resident = {
            let mut state = self.state.write().await;
            state.filter = filter;
            state
                .resident
                .clone()
                .filter(|data| data.week == state.week)
        };
        match resident {
            Some(data) => {
                self.next_generation();
                let mut state = self.state.write().await;
                let summaries = data.summarize(&state.filter);
                state.stats = AggregateStats::of(&summaries);
                state.summaries = summaries;
                state.loading = false;
            }
            None => self.refresh().await,
        }
    }

    /// Full aggregation cycle for the current window and filter. Also the
    /// explicit retry action after a failed fetch.
    pub async fn refresh(&self) {
        let generation = self.next_generation();
        let week = {
            let mut state = self.state.write().await;
            state.loading = true;
            state.week
        };
        let fetched = self.aggregator.fetch_week(week).await;
        self.apply(generation, fetched).await;
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Applies a completed fetch, unless a newer request superseded it while
    /// it was in flight.
    pub(crate) async fn apply(&self, generation: u64, fetched: Result<WeekData, TransportError>) {
        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "dropping stale aggregation result");
            return;
        }
        match fetched {
            Ok(data) => {
                let summaries = data.summarize(&state.filter);
                state.stats = AggregateStats::of(&summaries);
                state.summaries = summaries;
                state.resident = Some(data);
                state.error = None;
            }
            Err(error) => {
                tracing::warn!(%error, "week aggregation failed, keeping last-good view");
                state.error = Some(DashboardError::Fetch(error).to_string());
            }
        }
        state.loading = false;
    }
}

#[async_trait]
impl<TRoster, TEntries> FeedSink for DashboardController<TRoster, TEntries>
where
    TRoster: RosterRepository,
    TEntries: EntryRepository,
{
    // Coarse invalidation: any feed event re-aggregates the whole current
    // window and filter.
    async fn reaggregate(&self) {
        self.refresh().await;
    }

    async fn connection_changed(&self, connection: ConnectionState) {
        self.state.write().await.connection = connection;
    }
}
