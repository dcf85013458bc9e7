use crate::core::ports::{SubscriptionError, TransportError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("could not load this week: {0}")]
    Fetch(#[from] TransportError),

    #[error(transparent)]
    Feed(#[from] SubscriptionError),
}
