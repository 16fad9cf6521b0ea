//! Validated agent base URL.

use super::RegistryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Path, relative to an agent's base URL, at which its card is published.
const AGENT_CARD_PATH: &str = ".well-known/agent-card.json";

/// Normalized base URL of a registered agent.
///
/// The URL is the sole identity of an agent in the registry. Input is
/// parsed as an absolute `http` or `https` URL, re-serialized (which
/// lowercases the host), and stripped of trailing slashes, so
/// `https://Example.com/` and `https://example.com` name the same agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentUrl(String);

impl AgentUrl {
    /// Parses and normalizes an agent base URL.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyUrl`] for blank input,
    /// [`RegistryDomainError::InvalidUrl`] when the value is not an absolute
    /// URL with a host, or [`RegistryDomainError::UnsupportedScheme`] for
    /// schemes other than `http` and `https`.
    pub fn new(value: impl AsRef<str>) -> Result<Self, RegistryDomainError> {
        let raw = value.as_ref().trim();
        if raw.is_empty() {
            return Err(RegistryDomainError::EmptyUrl);
        }

        let parsed = Url::parse(raw).map_err(|err| RegistryDomainError::InvalidUrl {
            url: raw.to_owned(),
            reason: err.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RegistryDomainError::UnsupportedScheme(
                parsed.scheme().to_owned(),
            ));
        }

        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(RegistryDomainError::InvalidUrl {
                url: raw.to_owned(),
                reason: "missing host".to_owned(),
            });
        }

        Ok(Self(parsed.as_str().trim_end_matches('/').to_owned()))
    }

    /// Returns the normalized URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the well-known agent card location for this agent.
    #[must_use]
    pub fn card_url(&self) -> String {
        format!("{}/{AGENT_CARD_PATH}", self.0)
    }
}

impl TryFrom<String> for AgentUrl {
    type Error = RegistryDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgentUrl> for String {
    fn from(url: AgentUrl) -> Self {
        url.0
    }
}

impl AsRef<str> for AgentUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AgentUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
