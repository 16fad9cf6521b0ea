//! Thread-safe in-memory agent store.

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, map::Entry};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::registry::{
    domain::{AgentCard, AgentRecord, AgentUrl},
    ports::{AgentStore, ProbeFailure},
};

type RecordMap = IndexMap<AgentUrl, AgentRecord>;

/// Insertion-ordered agent store guarded by a single reader-writer lock.
///
/// Records are replaced whole under the write lock, so a lock poisoned by a
/// panicking writer still guards a consistent map and is recovered rather
/// than propagated.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAgentStore {
    state: Arc<RwLock<RecordMap>>,
}

impl InMemoryAgentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, RecordMap> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RecordMap> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AgentStore for InMemoryAgentStore {
    fn upsert(&self, record: AgentRecord) {
        self.write().insert(record.url().clone(), record);
    }

    fn register(&self, url: AgentUrl, card: AgentCard, seen_at: DateTime<Utc>) -> AgentRecord {
        match self.write().entry(url) {
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                record.mark_alive(card, seen_at);
                record.clone()
            }
            Entry::Vacant(entry) => {
                let record = AgentRecord::registered(entry.key().clone(), card, seen_at);
                entry.insert(record).clone()
            }
        }
    }

    fn remove(&self, url: &AgentUrl) -> bool {
        self.write().shift_remove(url).is_some()
    }

    fn get(&self, url: &AgentUrl) -> Option<AgentRecord> {
        self.read().get(url).cloned()
    }

    fn snapshot(&self) -> Vec<AgentRecord> {
        self.read().values().cloned().collect()
    }

    fn size(&self) -> usize {
        self.read().len()
    }

    fn record_probe_success(
        &self,
        url: &AgentUrl,
        card: AgentCard,
        seen_at: DateTime<Utc>,
    ) -> bool {
        let mut records = self.write();
        let Some(record) = records.get_mut(url) else {
            return false;
        };
        record.mark_alive(card, seen_at);
        true
    }

    fn record_probe_failure(&self, url: &AgentUrl, max_failures: u32) -> ProbeFailure {
        let mut records = self.write();
        let Some(record) = records.get_mut(url) else {
            return ProbeFailure::Missing;
        };

        let failures = record.mark_unreachable();
        if failures < max_failures {
            return ProbeFailure::Counted(failures);
        }

        records
            .shift_remove(url)
            .map_or(ProbeFailure::Missing, ProbeFailure::Evicted)
    }
}
