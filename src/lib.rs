//! A2A registry: central discovery and liveness tracking for A2A agents.
//!
//! Agents register by URL; the registry fetches their agent card, keeps it
//! in memory, answers skill-based discovery queries, and periodically
//! probes every agent, deregistering those that stay unreachable.
//!
//! # Architecture
//!
//! The registry follows hexagonal architecture principles:
//!
//! - **Domain**: Agent URLs, cards, and records with no I/O
//! - **Ports**: The agent store and card fetcher traits
//! - **Adapters**: In-memory storage and the HTTP card fetcher
//! - **Services**: Registration, discovery, and the liveness sweeper
//!
//! # Modules
//!
//! - [`registry`]: Domain, ports, adapters, and services
//! - [`api`]: HTTP routes over the registry service
//! - [`config`]: Command-line and environment configuration
//! - [`server`]: Process wiring and graceful shutdown
//! - [`telemetry`]: Tracing subscriber setup

pub mod api;
pub mod config;
pub mod registry;
pub mod server;
pub mod telemetry;
