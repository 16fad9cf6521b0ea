//! A2A registry server binary.

use a2a_registry::{config::RegistryConfig, server, telemetry};
use clap::Parser;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = RegistryConfig::parse();
    telemetry::init(config.debug, config.log_json)?;
    server::run(&config).await.map_err(Into::into)
}
