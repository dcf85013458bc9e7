// In memory change feed over a tokio broadcast channel.
//
// Purpose
// - Exercise the feed listener without a broker, and drive the dashboard
//   locally when the admin flows mutate the store.
//
// Responsibilities
// - Hand out subscriptions that release their channel on drop.
// - Simulate a refused handshake (offline) and a transport drop (close).
// - Count live subscriptions so tests can check acquisition and release.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::broadcast;

use crate::core::ports::{ChangeFeed, FeedEvent, FeedSubscription, SubscriptionError};

const FEED_CAPACITY: usize = 64;

pub struct InMemoryChangeFeed {
    sender: std::sync::Mutex<Option<broadcast::Sender<FeedEvent>>>,
    active: Arc<AtomicUsize>,
    offline: AtomicBool,
}

impl Default for InMemoryChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryChangeFeed {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            sender: std::sync::Mutex::new(Some(sender)),
            active: Arc::new(AtomicUsize::new(0)),
            offline: AtomicBool::new(false),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Notifies subscribers. A notification with no listeners is dropped.
    pub fn publish(&self, event: FeedEvent) {
        if let Ok(guard) = self.sender.lock()
            && let Some(sender) = guard.as_ref()
        {
            let _ = sender.send(event);
        }
    }

    /// Simulates the transport dropping: every open subscription sees
    /// `SubscriptionError::Closed` on its next read.
    pub fn close(&self) {
        if let Ok(mut guard) = self.sender.lock() {
            guard.take();
        }
    }

    pub fn active_subscriptions(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

pub struct InMemoryFeedSubscription {
    receiver: broadcast::Receiver<FeedEvent>,
    active: Arc<AtomicUsize>,
}

impl Drop for InMemoryFeedSubscription {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl FeedSubscription for InMemoryFeedSubscription {
    async fn next_event(&mut self) -> Result<FeedEvent, SubscriptionError> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Ok(event),
                // A slow consumer only misses notifications, never data; the
                // next signal still triggers a full re-aggregation.
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "feed consumer lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(SubscriptionError::Closed);
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl ChangeFeed for InMemoryChangeFeed {
    type Subscription = InMemoryFeedSubscription;

    async fn subscribe(&self) -> Result<Self::Subscription, SubscriptionError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(SubscriptionError::Handshake("change feed offline".to_string()));
        }
        let receiver = {
            let guard = self
                .sender
                .lock()
                .map_err(|_| SubscriptionError::Handshake("feed lock poisoned".to_string()))?;
            match guard.as_ref() {
                Some(sender) => sender.subscribe(),
                None => return Err(SubscriptionError::Handshake("change feed closed".to_string())),
            }
        };
        self.active.fetch_add(1, Ordering::SeqCst);
        Ok(InMemoryFeedSubscription {
            receiver,
            active: self.active.clone(),
        })
    }
}
