//! Service layer for agent registration and discovery.
//!
//! Provides [`RegistryService`] which coordinates card retrieval, record
//! bookkeeping, and discovery over the agent store.

use crate::registry::{
    domain::{AgentRecord, AgentUrl, RegistryDomainError, SkillQuery},
    ports::{AgentStore, CardFetcher, FetchError},
    services::discovery::match_agents,
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Service-level errors for registry operations.
#[derive(Debug, Error)]
pub enum RegistryServiceError {
    /// Caller input failed validation.
    #[error(transparent)]
    Validation(#[from] RegistryDomainError),
    /// The agent card could not be retrieved or validated.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// No agent is registered under the given URL.
    #[error("Agent not found: {0}")]
    NotFound(AgentUrl),
}

/// Result type for registry service operations.
pub type RegistryServiceResult<T> = Result<T, RegistryServiceError>;

/// Point-in-time registry health summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryHealth {
    /// Number of registered agents.
    pub agents: usize,
    /// Configured liveness sweep period.
    pub check_interval: Duration,
}

/// Agent registration and discovery orchestration service.
pub struct RegistryService<S, F, C>
where
    S: AgentStore,
    F: CardFetcher,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    fetcher: Arc<F>,
    clock: Arc<C>,
    check_interval: Duration,
}

impl<S, F, C> Clone for RegistryService<S, F, C>
where
    S: AgentStore,
    F: CardFetcher,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            fetcher: Arc::clone(&self.fetcher),
            clock: Arc::clone(&self.clock),
            check_interval: self.check_interval,
        }
    }
}

impl<S, F, C> RegistryService<S, F, C>
where
    S: AgentStore,
    F: CardFetcher,
    C: Clock + Send + Sync,
{
    /// Creates a new registry service.
    ///
    /// `check_interval` is only reported by [`RegistryService::health`];
    /// the sweep itself is driven by
    /// [`LivenessSweeper`](crate::registry::services::LivenessSweeper).
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        fetcher: Arc<F>,
        clock: Arc<C>,
        check_interval: Duration,
    ) -> Self {
        Self {
            store,
            fetcher,
            clock,
            check_interval,
        }
    }

    /// Registers the agent at `raw_url`, or refreshes it when already known.
    ///
    /// The card is fetched before the store is touched, so a failed fetch
    /// leaves no trace. Re-registration keeps the original registration
    /// time and resets the failure count.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Validation`] for a malformed URL or
    /// [`RegistryServiceError::Fetch`] when the card cannot be retrieved.
    pub async fn register(&self, raw_url: &str) -> RegistryServiceResult<AgentRecord> {
        let url = AgentUrl::new(raw_url)?;
        let card = self.fetcher.fetch(&url).await?;

        let record = self.store.register(url, card, self.clock.utc());

        info!(
            agent = record.card().name(),
            url = %record.url(),
            "agent registered"
        );
        Ok(record)
    }

    /// Returns the registered agents matching `raw_query`, in registration
    /// order. An unmatched query yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Validation`] when the query is blank.
    pub fn discover(&self, raw_query: &str) -> RegistryServiceResult<Vec<AgentRecord>> {
        let query = SkillQuery::new(raw_query)?;
        Ok(match_agents(self.store.snapshot(), &query))
    }

    /// Returns every registered agent in registration order.
    #[must_use]
    pub fn list_agents(&self) -> Vec<AgentRecord> {
        self.store.snapshot()
    }

    /// Removes the agent registered at `raw_url`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Validation`] for a malformed URL or
    /// [`RegistryServiceError::NotFound`] when no agent is registered there.
    pub fn unregister(&self, raw_url: &str) -> RegistryServiceResult<AgentUrl> {
        let url = AgentUrl::new(raw_url)?;
        if !self.store.remove(&url) {
            return Err(RegistryServiceError::NotFound(url));
        }
        info!(url = %url, "agent unregistered");
        Ok(url)
    }

    /// Returns the current agent count and the configured sweep period.
    #[must_use]
    pub fn health(&self) -> RegistryHealth {
        RegistryHealth {
            agents: self.store.size(),
            check_interval: self.check_interval,
        }
    }
}
