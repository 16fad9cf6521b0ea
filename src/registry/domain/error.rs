//! Error types for registry domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing registry domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryDomainError {
    /// The agent URL is empty after trimming.
    #[error("agent URL must not be empty")]
    EmptyUrl,

    /// The agent URL could not be parsed as an absolute URL.
    #[error("invalid agent URL '{url}': {reason}")]
    InvalidUrl {
        /// Raw input as supplied by the caller.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The agent URL uses a scheme other than `http` or `https`.
    #[error("unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    /// The discovery query is empty after trimming.
    #[error("skill query must not be empty")]
    EmptyQuery,

    /// The agent card carries a blank `name`.
    #[error("agent card name must not be empty")]
    EmptyCardName,

    /// The agent card payload does not match the card schema.
    #[error("{0}")]
    InvalidCard(String),
}
