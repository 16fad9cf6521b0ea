//! Card fetcher that reads `/.well-known/agent-card.json` over HTTP.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::registry::{
    domain::{AgentCard, AgentUrl},
    ports::{CardFetcher, FetchError, FetchResult},
};

/// Timeouts applied by [`HttpCardFetcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpCardFetcherConfig {
    /// Timeout for registration-time fetches.
    pub fetch_timeout: Duration,
    /// Timeout for liveness probes.
    pub probe_timeout: Duration,
}

impl Default for HttpCardFetcherConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(5),
        }
    }
}

/// `reqwest`-backed card fetcher.
#[derive(Debug, Clone)]
pub struct HttpCardFetcher {
    client: reqwest::Client,
    config: HttpCardFetcherConfig,
}

impl HttpCardFetcher {
    /// Creates a fetcher with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`reqwest::Error`] when the HTTP client cannot
    /// be initialised (for example when the TLS backend fails to load).
    pub fn new(config: HttpCardFetcherConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("a2a-registry/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a fetcher around an existing client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, config: HttpCardFetcherConfig) -> Self {
        Self { client, config }
    }

    async fn get_card(&self, url: &AgentUrl, timeout: Duration) -> FetchResult<AgentCard> {
        let card_url = url.card_url();
        debug!(card_url = %card_url, timeout = ?timeout, "fetching agent card");

        let response = self
            .client
            .get(&card_url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| transport_error(&card_url, timeout, &err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                card_url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| transport_error(&card_url, timeout, &err))?;

        let document: Value =
            serde_json::from_slice(&body).map_err(|err| FetchError::InvalidCard {
                card_url: card_url.clone(),
                reason: format!("malformed JSON: {err}"),
            })?;

        AgentCard::from_json(document).map_err(|err| FetchError::InvalidCard {
            card_url,
            reason: err.to_string(),
        })
    }
}

fn transport_error(card_url: &str, timeout: Duration, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            card_url: card_url.to_owned(),
            after: timeout,
        }
    } else {
        FetchError::Unreachable {
            card_url: card_url.to_owned(),
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl CardFetcher for HttpCardFetcher {
    async fn fetch(&self, url: &AgentUrl) -> FetchResult<AgentCard> {
        self.get_card(url, self.config.fetch_timeout).await
    }

    async fn probe(&self, url: &AgentUrl) -> FetchResult<AgentCard> {
        self.get_card(url, self.config.probe_timeout).await
    }
}
