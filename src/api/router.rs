//! Route table and middleware.

use super::handlers;
use crate::{
    config::ANY_ORIGIN,
    registry::{
        ports::{AgentStore, CardFetcher},
        services::RegistryService,
    },
};
use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post},
};
use mockable::Clock;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Builds the registry router over `registry`.
#[must_use]
pub fn create_router<S, F, C>(
    registry: Arc<RegistryService<S, F, C>>,
    cors: CorsLayer,
) -> Router
where
    S: AgentStore + 'static,
    F: CardFetcher + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::health::<S, F, C>))
        .route("/register", post(handlers::register::<S, F, C>))
        .route("/discover", get(handlers::discover::<S, F, C>))
        .route("/agents", get(handlers::list_agents::<S, F, C>))
        .route("/unregister", delete(handlers::unregister::<S, F, C>))
        .with_state(registry)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Builds the CORS layer for `origins`.
///
/// A `*` entry allows any origin. Entries that are not valid header values
/// are skipped with a warning.
#[must_use]
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|origin| origin.trim() == ANY_ORIGIN) {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
}
