//! Process configuration from command-line flags and environment variables.

use crate::registry::{
    adapters::http::HttpCardFetcherConfig,
    services::{SweeperConfig, SweeperConfigError},
};
use clap::Parser;
use std::time::Duration;

/// Wildcard accepted in [`RegistryConfig::cors_origins`].
pub const ANY_ORIGIN: &str = "*";

/// A2A registry configuration.
///
/// Every flag can also be supplied through the environment variable named
/// next to it.
#[derive(Debug, Clone, Parser)]
#[command(name = "a2a-registry")]
#[command(about = "Central discovery and liveness registry for A2A agents", long_about = None)]
#[command(version)]
pub struct RegistryConfig {
    /// Application name shown in logs.
    #[arg(long, env = "APP_NAME", default_value = "A2A registry")]
    pub app_name: String,

    /// Interface to bind (`127.0.0.1` for localhost, `0.0.0.0` for every
    /// interface).
    #[arg(long, env = "APP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "APP_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Enable debug logging.
    #[arg(long, env = "DEBUG")]
    pub debug: bool,

    /// Emit logs as JSON lines.
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,

    /// Allowed CORS origins, comma separated; `*` allows any origin.
    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = ANY_ORIGIN
    )]
    pub cors_origins: Vec<String>,

    /// Seconds between liveness sweeps.
    #[arg(long, env = "HEALTH_CHECK_INTERVAL", default_value_t = 30)]
    pub health_check_interval: u64,

    /// Consecutive failed probes before an agent is deregistered.
    #[arg(long, env = "MAX_FAILURES", default_value_t = 3)]
    pub max_failures: u32,

    /// Seconds allowed for fetching a card during registration.
    #[arg(long, env = "REGISTER_TIMEOUT", default_value_t = 10)]
    pub register_timeout: u64,

    /// Seconds allowed for a liveness probe.
    #[arg(long, env = "PROBE_TIMEOUT", default_value_t = 5)]
    pub probe_timeout: u64,

    /// Maximum liveness probes in flight at once.
    #[arg(long, env = "MAX_CONCURRENT_PROBES", default_value_t = 8)]
    pub max_concurrent_probes: usize,
}

impl RegistryConfig {
    /// Returns the liveness sweep period.
    #[must_use]
    pub const fn check_interval(&self) -> Duration {
        Duration::from_secs(self.health_check_interval)
    }

    /// Builds the validated sweep configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`SweeperConfigError`] when the interval, failure
    /// threshold, or probe fan-out is zero.
    pub fn sweeper(&self) -> Result<SweeperConfig, SweeperConfigError> {
        SweeperConfig::new(
            self.check_interval(),
            self.max_failures,
            self.max_concurrent_probes,
        )
    }

    /// Returns the HTTP card fetcher timeouts.
    #[must_use]
    pub const fn fetcher(&self) -> HttpCardFetcherConfig {
        HttpCardFetcherConfig {
            fetch_timeout: Duration::from_secs(self.register_timeout),
            probe_timeout: Duration::from_secs(self.probe_timeout),
        }
    }

    /// Returns whether any origin may call the API.
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins
            .iter()
            .any(|origin| origin.trim() == ANY_ORIGIN)
    }
}
