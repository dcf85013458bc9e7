// End-to-end: store + feed + listener + controller wired the way main.rs
// wires them, driven through the public operations only.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::adapters::in_memory::in_memory_feed::InMemoryChangeFeed;
use crate::adapters::in_memory::in_memory_store::InMemoryTimecardStore;
use crate::application::controller::DashboardController;
use crate::application::listener::{ConnectionState, FeedListener};
use crate::core::ports::{FeedEvent, FeedEventKind, FeedResource, SubscriptionError};
use crate::core::week::Week;
use crate::test_support::fixtures::employees::sample_roster;
use crate::test_support::fixtures::entries::{TimeCardEntryBuilder, sample_week_entries};

type Controller = DashboardController<InMemoryTimecardStore, InMemoryTimecardStore>;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn dashboard() -> (
    Arc<InMemoryTimecardStore>,
    Arc<InMemoryChangeFeed>,
    Arc<Controller>,
    Arc<FeedListener<InMemoryChangeFeed>>,
) {
    let store = Arc::new(InMemoryTimecardStore::new());
    for employee in sample_roster() {
        store.add_employee(employee).await;
    }
    for entry in sample_week_entries() {
        store.upsert_entry(entry).await;
    }
    let feed = Arc::new(InMemoryChangeFeed::new());
    let controller = Arc::new(DashboardController::new(
        store.clone(),
        store.clone(),
        Week::containing(date(2024, 1, 1)),
    ));
    let listener = Arc::new(FeedListener::new(feed.clone()));
    (store, feed, controller, listener)
}

fn spawn_listener(
    listener: Arc<FeedListener<InMemoryChangeFeed>>,
    controller: Arc<Controller>,
) -> tokio::task::JoinHandle<Result<(), SubscriptionError>> {
    tokio::spawn(async move { listener.run(controller.as_ref()).await })
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}

#[tokio::test]
async fn shows_the_documented_sample_week() {
    let (_store, _feed, controller, _listener) = dashboard().await;
    controller.refresh().await;

    let view = controller.snapshot().await;
    assert_eq!(view.week_start, date(2024, 1, 1));

    let alice = &view.summaries[0];
    assert_eq!(alice.daily_hours[0], 12.0);
    assert_eq!(alice.total, 14.0);
    let bob = &view.summaries[1];
    assert_eq!(bob.daily_hours[4], 6.0);
    assert_eq!(bob.total, 6.0);

    assert_eq!(view.stats.total_hours, 20.0);
    assert_eq!(view.stats.active_count, 2);
    assert_eq!(view.stats.avg_hours, 10.0);
    assert_eq!(
        view.stats.total_hours,
        view.summaries.iter().map(|s| s.total).sum::<f64>()
    );
}

#[tokio::test]
async fn refreshes_the_matrix_when_the_feed_signals_a_mutation() {
    let (store, feed, controller, listener) = dashboard().await;
    controller.refresh().await;
    let handle = spawn_listener(listener, controller.clone());
    settle().await;
    assert_eq!(
        controller.snapshot().await.connection_state,
        ConnectionState::Connected
    );

    let fetches_before = store.entry_fetches();
    store
        .upsert_entry(
            TimeCardEntryBuilder::new()
                .employee_id("emp-bob")
                .date(date(2024, 1, 2))
                .hours(4.0)
                .build(),
        )
        .await;
    feed.publish(FeedEvent {
        kind: FeedEventKind::Insert,
        resource: FeedResource::Entry,
    });
    settle().await;

    // One event, one re-aggregation.
    assert_eq!(store.entry_fetches(), fetches_before + 1);
    let view = controller.snapshot().await;
    assert_eq!(view.stats.total_hours, 24.0);
    assert_eq!(view.summaries[1].total, 10.0);

    feed.close();
    assert_eq!(handle.await.unwrap(), Err(SubscriptionError::Closed));
}

#[tokio::test]
async fn roster_mutations_trigger_the_same_coarse_refresh() {
    let (store, feed, controller, listener) = dashboard().await;
    controller.refresh().await;
    let handle = spawn_listener(listener, controller.clone());
    settle().await;

    store
        .add_employee(
            crate::test_support::fixtures::employees::EmployeeBuilder::new()
                .employee_id("emp-carol")
                .display_name("Carol Smit")
                .build(),
        )
        .await;
    feed.publish(FeedEvent {
        kind: FeedEventKind::Insert,
        resource: FeedResource::Roster,
    });
    settle().await;

    let view = controller.snapshot().await;
    assert_eq!(view.summaries.len(), 3);
    assert_eq!(view.stats.included_count, 3);
    assert_eq!(view.stats.active_count, 2);

    feed.close();
    let _ = handle.await.unwrap();
}

#[tokio::test]
async fn a_dropped_feed_disconnects_without_losing_the_view() {
    let (_store, feed, controller, listener) = dashboard().await;
    controller.refresh().await;
    let handle = spawn_listener(listener.clone(), controller.clone());
    settle().await;

    feed.close();
    assert_eq!(handle.await.unwrap(), Err(SubscriptionError::Closed));
    assert_eq!(feed.active_subscriptions(), 0);

    let view = controller.snapshot().await;
    assert_eq!(view.connection_state, ConnectionState::Disconnected);
    // Manual data viewing still works while live refresh is down.
    assert_eq!(view.stats.total_hours, 20.0);
    controller.navigate_week(1).await;
    assert_eq!(controller.snapshot().await.week_start, date(2024, 1, 8));
}

#[tokio::test]
async fn a_failed_week_keeps_the_previous_week_visible_until_retry_succeeds() {
    let (store, _feed, controller, _listener) = dashboard().await;
    controller.refresh().await;

    store.set_entries_offline(true);
    controller.navigate_week(1).await;

    let view = controller.snapshot().await;
    assert_eq!(view.week_start, date(2024, 1, 8));
    assert!(view.error.is_some());
    // Last-good matrix from the previous week is still on screen.
    assert_eq!(view.stats.total_hours, 20.0);

    store.set_entries_offline(false);
    controller.refresh().await;
    let view = controller.snapshot().await;
    assert_eq!(view.error, None);
    assert_eq!(view.stats.total_hours, 0.0);
}
