// Shared timecard entry fixtures, including the canonical sample week:
// Alice logs 8h and 4h on Monday 2024-01-01 (a duplicate slot) and 2h on
// Wednesday; Bob logs 6h on Friday.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::entry::TimeCardEntry;

pub struct TimeCardEntryBuilder {
    inner: TimeCardEntry,
}

impl Default for TimeCardEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TimeCardEntryBuilder {
    pub fn new() -> Self {
        Self {
            inner: TimeCardEntry {
                entry_id: Uuid::now_v7(),
                employee_id: "emp-fixed-0001".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                hours: 8.0,
                task: None,
            },
        }
    }

    pub fn entry_id(mut self, v: Uuid) -> Self {
        self.inner.entry_id = v;
        self
    }

    pub fn employee_id(mut self, v: impl Into<String>) -> Self {
        self.inner.employee_id = v.into();
        self
    }

    pub fn date(mut self, v: NaiveDate) -> Self {
        self.inner.date = v;
        self
    }

    pub fn hours(mut self, v: f64) -> Self {
        self.inner.hours = v;
        self
    }

    pub fn task(mut self, v: impl Into<String>) -> Self {
        self.inner.task = Some(v.into());
        self
    }

    pub fn build(self) -> TimeCardEntry {
        self.inner
    }
}

pub fn sample_week_entries() -> Vec<TimeCardEntry> {
    let day = |d: u32| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
    vec![
        TimeCardEntryBuilder::new()
            .employee_id("emp-alice")
            .date(day(1))
            .hours(8.0)
            .task("Support")
            .build(),
        TimeCardEntryBuilder::new()
            .employee_id("emp-alice")
            .date(day(1))
            .hours(4.0)
            .task("On-site")
            .build(),
        TimeCardEntryBuilder::new()
            .employee_id("emp-alice")
            .date(day(3))
            .hours(2.0)
            .build(),
        TimeCardEntryBuilder::new()
            .employee_id("emp-bob")
            .date(day(5))
            .hours(6.0)
            .build(),
    ]
}
