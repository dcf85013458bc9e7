// The week aggregator reads the roster and the windowed entries through the
// repository ports and pivots them into summary rows.
//
// Purpose
// - One fetch cycle per requested window; idempotent for a given window,
//   filter, and data state.
//
// Responsibilities
// - Run both reads concurrently; either failure is recoverable on its own.
// - Keep raw week data around so a filter change can re-pivot without a
//   round trip.

use std::sync::Arc;

use crate::core::entry::TimeCardEntry;
use crate::core::ports::{EntryRepository, RosterRepository, TransportError};
use crate::core::roster::{Employee, EmployeeFilter};
use crate::core::summary::{WeeklySummary, pivot_week};
use crate::core::week::Week;

/// Raw fetch result for one window, resident until superseded.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekData {
    pub week: Week,
    pub roster: Vec<Employee>,
    pub entries: Vec<TimeCardEntry>,
}

impl WeekData {
    pub fn summarize(&self, filter: &EmployeeFilter) -> Vec<WeeklySummary> {
        pivot_week(self.week, &self.roster, &self.entries, filter)
    }
}

pub struct WeekAggregator<TRoster, TEntries>
where
    TRoster: RosterRepository,
    TEntries: EntryRepository,
{
    roster_repository: Arc<TRoster>,
    entry_repository: Arc<TEntries>,
}

impl<TRoster, TEntries> WeekAggregator<TRoster, TEntries>
where
    TRoster: RosterRepository,
    TEntries: EntryRepository,
{
    pub fn new(roster_repository: Arc<TRoster>, entry_repository: Arc<TEntries>) -> Self {
        Self {
            roster_repository,
            entry_repository,
        }
    }

    pub async fn fetch_week(&self, week: Week) -> Result<WeekData, TransportError> {
        let (roster, entries) = tokio::join!(
            self.roster_repository.roster(),
            self.entry_repository.entries_in_week(week),
        );
        Ok(WeekData {
            week,
            roster: roster?,
            entries: entries?,
        })
    }
}
