//! Shared test helpers for in-memory registry integration tests.

use a2a_registry::registry::{
    adapters::memory::{InMemoryAgentStore, StubCardFetcher},
    domain::{AgentCard, AgentUrl, Skill},
    services::{LivenessSweeper, RegistryService, SweeperConfig},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use std::time::Duration;

/// Sweep period used by every harness.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Consecutive failures before eviction.
pub const MAX_FAILURES: u32 = 3;

/// Registry service wired to in-memory adapters.
pub type TestService = RegistryService<InMemoryAgentStore, StubCardFetcher, DefaultClock>;

/// Liveness sweeper wired to in-memory adapters.
pub type TestSweeper = LivenessSweeper<InMemoryAgentStore, StubCardFetcher, DefaultClock>;

/// Service, sweeper, and the adapters they share.
pub struct Registry {
    /// Shared agent store.
    pub store: Arc<InMemoryAgentStore>,
    /// Scripted card fetcher.
    pub fetcher: Arc<StubCardFetcher>,
    /// Registration and discovery service.
    pub service: TestService,
    /// Liveness sweeper over the same store.
    pub sweeper: TestSweeper,
}

/// Provides a fresh registry for each test.
#[fixture]
pub fn registry() -> Registry {
    let store = Arc::new(InMemoryAgentStore::new());
    let fetcher = Arc::new(StubCardFetcher::new());
    let clock = Arc::new(DefaultClock);
    let service = RegistryService::new(
        Arc::clone(&store),
        Arc::clone(&fetcher),
        Arc::clone(&clock),
        CHECK_INTERVAL,
    );
    let config =
        SweeperConfig::new(CHECK_INTERVAL, MAX_FAILURES, 4).expect("valid sweeper config");
    let sweeper = LivenessSweeper::new(Arc::clone(&store), Arc::clone(&fetcher), clock, config);
    Registry {
        store,
        fetcher,
        service,
        sweeper,
    }
}

/// Parses a test agent URL.
pub fn agent_url(raw: &str) -> AgentUrl {
    AgentUrl::new(raw).expect("valid test url")
}

/// Builds a card named `name` with one skill carrying `tags`.
pub fn card_with_tags(name: &str, tags: &[&str]) -> AgentCard {
    AgentCard::new(name)
        .expect("valid test card")
        .with_description(format!("{name} test agent"))
        .with_skill(Skill::new(format!("{name} skill")).with_tags(tags.iter().copied()))
}

impl Registry {
    /// Serves a card for `raw` and returns its normalized URL.
    pub fn serve(&self, raw: &str, name: &str, tags: &[&str]) -> AgentUrl {
        let url = agent_url(raw);
        self.fetcher.serve_card(&url, card_with_tags(name, tags));
        url
    }
}
