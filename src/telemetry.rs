//! Tracing subscriber setup.

use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, fmt, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

pub use tracing_subscriber::util::TryInitError;

/// Dependencies whose request-level chatter is capped at `warn`.
const QUIET_TARGETS: [&str; 4] = ["hyper", "hyper_util", "reqwest", "tower_http"];

/// Returns the default filter directives when `RUST_LOG` is unset.
#[must_use]
pub fn default_directives(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    QUIET_TARGETS
        .iter()
        .fold(level.to_owned(), |directives, target| {
            format!("{directives},{target}=warn")
        })
}

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `debug`.
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already installed.
pub fn init(debug: bool, json: bool) -> Result<(), TryInitError> {
    subscriber(debug, json, std::io::stderr).try_init()
}

fn subscriber<W>(debug: bool, json: bool, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        Box::new(registry.with(fmt::layer().json().with_writer(writer)))
    } else {
        Box::new(registry.with(fmt::layer().with_writer(writer)))
    }
}
