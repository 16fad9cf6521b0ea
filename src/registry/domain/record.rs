//! Registry record aggregate.

use super::{AgentCard, AgentUrl};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// One registered agent together with its liveness bookkeeping.
///
/// `last_seen` never precedes `registered_at`, and `failure_count` counts
/// consecutive failed liveness probes since the agent last answered or was
/// registered.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRecord {
    url: AgentUrl,
    card: AgentCard,
    registered_at: DateTime<Utc>,
    last_seen: DateTime<Utc>,
    failure_count: u32,
}

impl AgentRecord {
    /// Creates a freshly registered record.
    #[must_use]
    pub fn new(url: AgentUrl, card: AgentCard, clock: &impl Clock) -> Self {
        Self::registered(url, card, clock.utc())
    }

    /// Creates a record first registered at `timestamp`.
    #[must_use]
    pub const fn registered(url: AgentUrl, card: AgentCard, timestamp: DateTime<Utc>) -> Self {
        Self {
            url,
            card,
            registered_at: timestamp,
            last_seen: timestamp,
            failure_count: 0,
        }
    }

    /// Returns the agent URL.
    #[must_use]
    pub const fn url(&self) -> &AgentUrl {
        &self.url
    }

    /// Returns the agent card.
    #[must_use]
    pub const fn card(&self) -> &AgentCard {
        &self.card
    }

    /// Returns the first registration timestamp.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Returns when the agent last answered or registered.
    #[must_use]
    pub const fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    /// Returns the number of consecutive failed probes.
    #[must_use]
    pub const fn failure_count(&self) -> u32 {
        self.failure_count
    }

    /// Records that the agent answered with `card` at `seen_at`, either to
    /// a liveness probe or by registering again.
    ///
    /// The original registration time is kept and the failure count starts
    /// over.
    pub fn mark_alive(&mut self, card: AgentCard, seen_at: DateTime<Utc>) {
        self.card = card;
        self.last_seen = seen_at.max(self.last_seen);
        self.failure_count = 0;
    }

    /// Records a failed probe and returns the new consecutive failure count.
    pub const fn mark_unreachable(&mut self) -> u32 {
        self.failure_count = self.failure_count.saturating_add(1);
        self.failure_count
    }

    /// Splits the record into its URL and card.
    #[must_use]
    pub fn into_parts(self) -> (AgentUrl, AgentCard) {
        (self.url, self.card)
    }
}
