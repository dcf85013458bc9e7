// In memory roster and entry store.
//
// Purpose
// - Exercise the aggregator and controller without a backend, and run the
//   dashboard locally.
//
// Responsibilities
// - Serve the roster in insertion order and entries filtered to a window.
// - Fail each repository independently through its own offline toggle.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::entry::TimeCardEntry;
use crate::core::ports::{EntryRepository, RosterRepository, TransportError};
use crate::core::roster::Employee;
use crate::core::week::Week;

#[derive(Default)]
pub struct InMemoryTimecardStore {
    employees: RwLock<Vec<Employee>>,
    entries: RwLock<Vec<TimeCardEntry>>,
    roster_offline: AtomicBool,
    entries_offline: AtomicBool,
    entry_fetches: AtomicU64,
}

impl InMemoryTimecardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_roster_offline(&self, offline: bool) {
        self.roster_offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_entries_offline(&self, offline: bool) {
        self.entries_offline.store(offline, Ordering::SeqCst);
    }

    /// Number of entry reads served so far. Tests use it to prove a filter
    /// change did not refetch.
    pub fn entry_fetches(&self) -> u64 {
        self.entry_fetches.load(Ordering::SeqCst)
    }

    pub async fn add_employee(&self, employee: Employee) {
        self.employees.write().await.push(employee);
    }

    /// Replaces the entry with the same id, or appends.
    pub async fn upsert_entry(&self, entry: TimeCardEntry) {
        let mut entries = self.entries.write().await;
        match entries.iter_mut().find(|e| e.entry_id == entry.entry_id) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
    }

    pub async fn remove_entry(&self, entry_id: Uuid) {
        self.entries.write().await.retain(|e| e.entry_id != entry_id);
    }
}

#[async_trait::async_trait]
impl RosterRepository for InMemoryTimecardStore {
    async fn roster(&self) -> Result<Vec<Employee>, TransportError> {
        if self.roster_offline.load(Ordering::SeqCst) {
            return Err(TransportError::Backend("roster repository offline".to_string()));
        }
        Ok(self.employees.read().await.clone())
    }
}

#[async_trait::async_trait]
impl EntryRepository for InMemoryTimecardStore {
    async fn entries_in_week(&self, week: Week) -> Result<Vec<TimeCardEntry>, TransportError> {
        if self.entries_offline.load(Ordering::SeqCst) {
            return Err(TransportError::Backend("entries repository offline".to_string()));
        }
        self.entry_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|entry| week.contains(entry.date))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod in_memory_timecard_store_tests {
    use super::*;
    use crate::test_support::fixtures::employees::sample_roster;
    use crate::test_support::fixtures::entries::TimeCardEntryBuilder;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[fixture]
    fn before_each() -> InMemoryTimecardStore {
        InMemoryTimecardStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_serve_the_roster_in_insertion_order(before_each: InMemoryTimecardStore) {
        let store = before_each;
        for employee in sample_roster() {
            store.add_employee(employee).await;
        }
        let roster = store.roster().await.unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].employee_id, "emp-alice");
        assert_eq!(roster[1].employee_id, "emp-bob");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_filter_entries_to_the_requested_window(before_each: InMemoryTimecardStore) {
        let store = before_each;
        let inside = TimeCardEntryBuilder::new().date(date(2024, 1, 3)).build();
        let outside = TimeCardEntryBuilder::new().date(date(2024, 1, 10)).build();
        store.upsert_entry(inside.clone()).await;
        store.upsert_entry(outside).await;

        let week = Week::containing(date(2024, 1, 1));
        let entries = store.entries_in_week(week).await.unwrap();
        assert_eq!(entries, vec![inside]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_replace_an_entry_with_the_same_id(before_each: InMemoryTimecardStore) {
        let store = before_each;
        let entry = TimeCardEntryBuilder::new().date(date(2024, 1, 3)).hours(2.0).build();
        store.upsert_entry(entry.clone()).await;

        let mut updated = entry.clone();
        updated.hours = 5.0;
        store.upsert_entry(updated).await;

        let week = Week::containing(date(2024, 1, 1));
        let entries = store.entries_in_week(week).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hours, 5.0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_remove_an_entry_by_id(before_each: InMemoryTimecardStore) {
        let store = before_each;
        let entry = TimeCardEntryBuilder::new().date(date(2024, 1, 3)).build();
        store.upsert_entry(entry.clone()).await;
        store.remove_entry(entry.entry_id).await;

        let week = Week::containing(date(2024, 1, 1));
        assert!(store.entries_in_week(week).await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_the_roster_read_when_offline(before_each: InMemoryTimecardStore) {
        let store = before_each;
        store.set_roster_offline(true);
        let result = store.roster().await;
        assert_eq!(
            result,
            Err(TransportError::Backend("roster repository offline".to_string()))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_the_entry_read_independently(before_each: InMemoryTimecardStore) {
        let store = before_each;
        store.set_entries_offline(true);
        assert!(store.roster().await.is_ok());
        let week = Week::containing(date(2024, 1, 1));
        assert_eq!(
            store.entries_in_week(week).await,
            Err(TransportError::Backend("entries repository offline".to_string()))
        );
    }
}
