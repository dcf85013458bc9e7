// The change-feed listener keeps the view informed about mutations without
// ever touching the matrix itself.
//
// Purpose
// - Two-state machine: disconnected (initial) and connected.
// - Every mutation notification becomes a single "re-aggregate now" signal
//   to the sink; the aggregator stays the only source of truth.
//
// Responsibilities
// - Hold at most one live subscription per listener. A new run can only open
//   its channel after the previous one is released.
// - Release the subscription on every exit path, success or error.
// - A dropped feed only flips the connection state; the surrounding view
//   stays up and the caller decides whether to re-subscribe.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use crate::core::ports::{ChangeFeed, FeedSubscription, SubscriptionError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connected,
    #[default]
    Disconnected,
}

/// Receives the listener's signals. The view state controller is the one
/// production implementation.
#[async_trait]
pub trait FeedSink: Send + Sync {
    async fn reaggregate(&self);
    async fn connection_changed(&self, connection: ConnectionState);
}

pub struct FeedListener<TFeed>
where
    TFeed: ChangeFeed,
{
    feed: Arc<TFeed>,
    // Held for the whole lifetime of one subscription; serializes runs so a
    // second channel can never coexist with the first.
    active: Mutex<()>,
    connection: RwLock<ConnectionState>,
}

impl<TFeed> FeedListener<TFeed>
where
    TFeed: ChangeFeed,
{
    pub fn new(feed: Arc<TFeed>) -> Self {
        Self {
            feed,
            active: Mutex::new(()),
            connection: RwLock::new(ConnectionState::Disconnected),
        }
    }

    pub async fn connection_state(&self) -> ConnectionState {
        *self.connection.read().await
    }

    async fn transition<TSink: FeedSink>(&self, sink: &TSink, connection: ConnectionState) {
        *self.connection.write().await = connection;
        sink.connection_changed(connection).await;
    }

    /// Subscribes and pumps notifications into the sink until the feed drops
    /// or closes. Returns the terminating error; the subscription itself is
    /// gone by then, so calling `run` again re-subscribes cleanly.
    pub async fn run<TSink: FeedSink>(&self, sink: &TSink) -> Result<(), SubscriptionError> {
        let _active = self.active.lock().await;

        let mut subscription = match self.feed.subscribe().await {
            Ok(subscription) => subscription,
            Err(error) => {
                tracing::warn!(%error, "change feed handshake failed");
                self.transition(sink, ConnectionState::Disconnected).await;
                return Err(error);
            }
        };
        self.transition(sink, ConnectionState::Connected).await;

        let result = loop {
            match subscription.next_event().await {
                Ok(event) => {
                    tracing::debug!(?event, "feed notification, re-aggregating");
                    sink.reaggregate().await;
                }
                Err(error) => break Err(error),
            }
        };

        // Release the channel before reporting the drop.
        drop(subscription);
        self.transition(sink, ConnectionState::Disconnected).await;
        result
    }
}
