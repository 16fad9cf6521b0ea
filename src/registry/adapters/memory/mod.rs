//! In-memory adapters.
//!
//! The registry keeps no durable state, so [`InMemoryAgentStore`] is the
//! production store. [`StubCardFetcher`] serves scripted cards for tests
//! and local deterministic runs.

mod fetcher;
mod store;

pub use fetcher::StubCardFetcher;
pub use store::InMemoryAgentStore;
