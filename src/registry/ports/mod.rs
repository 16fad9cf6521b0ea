//! Port contracts for the agent registry.
//!
//! Ports define infrastructure-agnostic interfaces used by the registry
//! and liveness services.

pub mod fetcher;
pub mod store;

pub use fetcher::{CardFetcher, FetchError, FetchResult};
pub use store::{AgentStore, ProbeFailure};

#[cfg(test)]
pub use fetcher::MockCardFetcher;
