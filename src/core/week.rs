// A Week is the canonical Monday-aligned 7-day window used for aggregation.
//
// Purpose
// - Pure calendar arithmetic: no clock reads, no input or output.
//
// Boundaries
// - Day granularity only. Time of day never enters this module.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

pub const DAYS_PER_WEEK: usize = 7;

/// Half-open interval `[start, start + 7 days)`. `start` is always a Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Week {
    start: NaiveDate,
}

impl Week {
    /// The week holding `date`: the Monday on or before it.
    pub fn containing(date: NaiveDate) -> Self {
        let back = i64::from(date.weekday().num_days_from_monday());
        Self {
            start: date - Duration::days(back),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end_exclusive(&self) -> NaiveDate {
        self.start + Duration::days(DAYS_PER_WEEK as i64)
    }

    /// Exact and reversible: `w.shift(n).shift(-n) == w` for any `n`.
    pub fn shift(&self, delta_weeks: i64) -> Self {
        Self {
            start: self.start + Duration::weeks(delta_weeks),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.day_index(date).is_some()
    }

    /// Monday-first slot of `date` within the window, `None` when outside.
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        let offset = date.signed_duration_since(self.start).num_days();
        (0..DAYS_PER_WEEK as i64)
            .contains(&offset)
            .then_some(offset as usize)
    }

    /// The 7 dates of the window, Monday first. Fresh iterator on every call.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..DAYS_PER_WEEK as i64).map(move |offset| start + Duration::days(offset))
    }

    pub fn is_monday_aligned(&self) -> bool {
        self.start.weekday() == Weekday::Mon
    }
}
