//! Application services for the agent registry.

pub mod discovery;
mod registry;
mod sweeper;

pub use discovery::{match_agents, record_matches};
pub use registry::{RegistryHealth, RegistryService, RegistryServiceError, RegistryServiceResult};
pub use sweeper::{LivenessSweeper, SweepReport, SweeperConfig, SweeperConfigError, SweeperHandle};
