//! Agent registration, discovery, and liveness tracking.
//!
//! Agents register by base URL; the registry fetches their agent card,
//! keeps one record per normalized URL, answers skill discovery queries
//! over a point-in-time snapshot, and periodically re-probes every agent,
//! evicting those that stay unreachable. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
