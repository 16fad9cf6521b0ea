//! Store port owning the registry's agent records.

use crate::registry::domain::{AgentCard, AgentRecord, AgentUrl};
use chrono::{DateTime, Utc};

/// Outcome of committing a failed liveness probe.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeFailure {
    /// The agent was no longer registered; nothing changed.
    Missing,
    /// The failure was counted; the value is the new consecutive count.
    Counted(u32),
    /// The failure reached the threshold and the record was removed.
    Evicted(AgentRecord),
}

/// Concurrent keyed store of agent records.
///
/// Every operation is atomic with respect to every other: no caller ever
/// observes a partially written record, and no external locking is needed.
/// Iteration order is registration order; replacing a record keeps its
/// position.
pub trait AgentStore: Send + Sync {
    /// Inserts `record`, replacing any record with the same URL.
    fn upsert(&self, record: AgentRecord);

    /// Registers `card` for `url` as seen at `seen_at` and returns the
    /// stored record.
    ///
    /// An existing record keeps its registration time and position, takes
    /// the new card, and has its failures reset. Otherwise a new record is
    /// appended. The lookup and the write are one atomic step.
    fn register(&self, url: AgentUrl, card: AgentCard, seen_at: DateTime<Utc>) -> AgentRecord;

    /// Removes the record for `url`, returning whether one existed.
    fn remove(&self, url: &AgentUrl) -> bool;

    /// Returns a copy of the record for `url`.
    fn get(&self, url: &AgentUrl) -> Option<AgentRecord>;

    /// Returns an independent, ordered copy of every record.
    ///
    /// Writes committed after the call never show up in the returned
    /// sequence.
    fn snapshot(&self) -> Vec<AgentRecord>;

    /// Returns the number of stored records.
    fn size(&self) -> usize;

    /// Commits a successful probe against the current record for `url`.
    ///
    /// Returns `false`, without inserting anything, when the agent is no
    /// longer registered.
    fn record_probe_success(&self, url: &AgentUrl, card: AgentCard, seen_at: DateTime<Utc>)
    -> bool;

    /// Commits a failed probe against the current record for `url`,
    /// removing it once its consecutive failures reach `max_failures`.
    fn record_probe_failure(&self, url: &AgentUrl, max_failures: u32) -> ProbeFailure;
}
