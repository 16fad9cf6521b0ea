//! Card fetcher port for retrieving agent cards from remote agents.

use crate::registry::domain::{AgentCard, AgentUrl};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Result type for card fetcher operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Retrieval contract for agent cards.
///
/// Implementations must bound every call with a timeout and must not retry
/// internally; a single failure is reported to the caller as is.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardFetcher: Send + Sync {
    /// Fetches and validates the card published by the agent at `url`.
    async fn fetch(&self, url: &AgentUrl) -> FetchResult<AgentCard>;

    /// Fetches the card as a liveness probe.
    ///
    /// Adapters may use a cheaper configuration here (for example a shorter
    /// timeout); the outcome must match [`CardFetcher::fetch`].
    async fn probe(&self, url: &AgentUrl) -> FetchResult<AgentCard> {
        self.fetch(url).await
    }
}

/// Errors returned by card fetcher adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The agent could not be reached.
    #[error("Failed to fetch agent card from {card_url}: {reason}")]
    Unreachable {
        /// Card location that was requested.
        card_url: String,
        /// Transport diagnostic.
        reason: String,
    },

    /// The agent answered with a non-success status code.
    #[error("Failed to fetch agent card from {card_url}: HTTP status {status}")]
    Status {
        /// Card location that was requested.
        card_url: String,
        /// HTTP status code returned by the agent.
        status: u16,
    },

    /// The agent did not answer within the configured timeout.
    #[error("Failed to fetch agent card from {card_url}: timed out after {after:?}")]
    Timeout {
        /// Card location that was requested.
        card_url: String,
        /// Timeout that elapsed.
        after: Duration,
    },

    /// The agent answered but the payload is not a valid agent card.
    #[error("Invalid agent card: {reason}")]
    InvalidCard {
        /// Card location that was requested.
        card_url: String,
        /// Validation diagnostic.
        reason: String,
    },
}

impl FetchError {
    /// Returns the card location the failed request targeted.
    #[must_use]
    pub fn card_url(&self) -> &str {
        match self {
            Self::Unreachable { card_url, .. }
            | Self::Status { card_url, .. }
            | Self::Timeout { card_url, .. }
            | Self::InvalidCard { card_url, .. } => card_url,
        }
    }

    /// Returns whether the agent answered with something that is not a card.
    #[must_use]
    pub const fn is_invalid_card(&self) -> bool {
        matches!(self, Self::InvalidCard { .. })
    }
}
