// Ports define what the dashboard needs from the outside world, without
// implementing it.
//
// Purpose
// - Describe the roster store, the entry store, and the change feed as
//   traits so the core stays independent of any backend or transport.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits.
//
// Testing guidance
// - Use the in-memory implementations in adapters::in_memory.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::entry::TimeCardEntry;
use crate::core::roster::Employee;
use crate::core::week::Week;

/// Recoverable fetch failure. Retry happens on the next navigation or an
/// explicit refresh; it never takes the view down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait RosterRepository: Send + Sync {
    async fn roster(&self) -> Result<Vec<Employee>, TransportError>;
}

#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Entries whose date falls inside the half-open window.
    async fn entries_in_week(&self, week: Week) -> Result<Vec<TimeCardEntry>, TransportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedEventKind {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedResource {
    Entry,
    Roster,
}

/// Mutation notification. The tags are the only guaranteed payload; the
/// consumer re-fetches instead of patching from the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedEvent {
    pub kind: FeedEventKind,
    pub resource: FeedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    #[error("subscribe handshake failed: {0}")]
    Handshake(String),

    #[error("change feed closed")]
    Closed,
}

#[async_trait]
pub trait ChangeFeed: Send + Sync {
    type Subscription: FeedSubscription + 'static;

    async fn subscribe(&self) -> Result<Self::Subscription, SubscriptionError>;
}

/// A live channel of feed events. Dropping the value releases the channel.
#[async_trait]
pub trait FeedSubscription: Send {
    async fn next_event(&mut self) -> Result<FeedEvent, SubscriptionError>;
}
