//! Scripted in-memory card fetcher.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use crate::registry::{
    domain::{AgentCard, AgentUrl},
    ports::{CardFetcher, FetchError, FetchResult},
};

/// Card fetcher that answers from a table of scripted responses.
///
/// URLs without a scripted response are reported as unreachable. An
/// optional latency is applied to every call, which lets tests hold a sweep
/// cycle open.
#[derive(Debug, Clone, Default)]
pub struct StubCardFetcher {
    state: Arc<RwLock<StubState>>,
}

#[derive(Debug, Default)]
struct StubState {
    responses: HashMap<AgentUrl, FetchResult<AgentCard>>,
    calls: HashMap<AgentUrl, usize>,
    latency: Option<Duration>,
}

impl StubCardFetcher {
    /// Creates a fetcher with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `card` for `url` until changed.
    pub fn serve_card(&self, url: &AgentUrl, card: AgentCard) {
        self.write_state(|state| {
            state.responses.insert(url.clone(), Ok(card));
        });
    }

    /// Fails every request for `url` as unreachable with `reason`.
    pub fn fail(&self, url: &AgentUrl, reason: impl Into<String>) {
        let error = FetchError::Unreachable {
            card_url: url.card_url(),
            reason: reason.into(),
        };
        self.fail_with(url, error);
    }

    /// Fails every request for `url` with `error`.
    pub fn fail_with(&self, url: &AgentUrl, error: FetchError) {
        self.write_state(|state| {
            state.responses.insert(url.clone(), Err(error));
        });
    }

    /// Delays every subsequent response by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.write_state(|state| state.latency = Some(latency));
    }

    /// Returns how many fetches or probes targeted `url`.
    #[must_use]
    pub fn calls(&self, url: &AgentUrl) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
            .get(url)
            .copied()
            .unwrap_or_default()
    }

    fn write_state(&self, change: impl FnOnce(&mut StubState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        change(&mut state);
    }

    fn respond(&self, url: &AgentUrl) -> (FetchResult<AgentCard>, Option<Duration>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state.calls.entry(url.clone()).or_default() += 1;
        let response = state.responses.get(url).cloned().unwrap_or_else(|| {
            Err(FetchError::Unreachable {
                card_url: url.card_url(),
                reason: "connection refused".to_owned(),
            })
        });
        (response, state.latency)
    }
}

#[async_trait]
impl CardFetcher for StubCardFetcher {
    async fn fetch(&self, url: &AgentUrl) -> FetchResult<AgentCard> {
        let (response, latency) = self.respond(url);
        if let Some(delay) = latency {
            tokio::time::sleep(delay).await;
        }
        response
    }
}
