//! Request handlers and wire types.

use super::ApiError;
use crate::registry::{
    domain::{AgentCard, AgentRecord},
    ports::{AgentStore, CardFetcher},
    services::RegistryService,
};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared handler state.
pub(super) type Registry<S, F, C> = Arc<RegistryService<S, F, C>>;

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Number of registered agents.
    pub agents: usize,
    /// Liveness sweep period in seconds.
    pub check_interval: u64,
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Base URL of the agent to register.
    pub url: String,
}

/// Response of `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Always `"registered"`.
    pub status: String,
    /// Name from the agent's card.
    pub agent: String,
}

/// Query of `GET /discover`.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverParams {
    /// Skill tag or free-text fragment to search for.
    pub skill: Option<String>,
}

/// Query of `DELETE /unregister`.
#[derive(Debug, Clone, Deserialize)]
pub struct UnregisterParams {
    /// URL of the agent to remove.
    pub url: Option<String>,
}

/// Response of `DELETE /unregister`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnregisterResponse {
    /// Always `"unregistered"`.
    pub status: String,
    /// Normalized URL that was removed.
    pub url: String,
}

/// One registered agent as returned by listing and discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    /// Normalized agent URL.
    pub url: String,
    /// Agent card exactly as published, including pass-through fields.
    pub card: AgentCard,
}

impl From<AgentRecord> for AgentView {
    fn from(record: AgentRecord) -> Self {
        let (url, card) = record.into_parts();
        Self {
            url: url.as_str().to_owned(),
            card,
        }
    }
}

fn views(records: Vec<AgentRecord>) -> Vec<AgentView> {
    records.into_iter().map(AgentView::from).collect()
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::Validation(format!("query parameter '{name}' is required")))
}

pub(super) async fn health<S, F, C>(
    State(registry): State<Registry<S, F, C>>,
) -> Json<HealthResponse>
where
    S: AgentStore + 'static,
    F: CardFetcher + 'static,
    C: Clock + Send + Sync + 'static,
{
    let health = registry.health();
    Json(HealthResponse {
        status: "ok".to_owned(),
        agents: health.agents,
        check_interval: health.check_interval.as_secs(),
    })
}

pub(super) async fn register<S, F, C>(
    State(registry): State<Registry<S, F, C>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiError>
where
    S: AgentStore + 'static,
    F: CardFetcher + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = payload?;
    let record = registry.register(&request.url).await?;
    Ok(Json(RegisterResponse {
        status: "registered".to_owned(),
        agent: record.card().name().to_owned(),
    }))
}

pub(super) async fn discover<S, F, C>(
    State(registry): State<Registry<S, F, C>>,
    query: Result<Query<DiscoverParams>, QueryRejection>,
) -> Result<Json<Vec<AgentView>>, ApiError>
where
    S: AgentStore + 'static,
    F: CardFetcher + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Query(params) = query?;
    let skill = required(params.skill, "skill")?;
    Ok(Json(views(registry.discover(&skill)?)))
}

pub(super) async fn list_agents<S, F, C>(
    State(registry): State<Registry<S, F, C>>,
) -> Json<Vec<AgentView>>
where
    S: AgentStore + 'static,
    F: CardFetcher + 'static,
    C: Clock + Send + Sync + 'static,
{
    Json(views(registry.list_agents()))
}

pub(super) async fn unregister<S, F, C>(
    State(registry): State<Registry<S, F, C>>,
    query: Result<Query<UnregisterParams>, QueryRejection>,
) -> Result<Json<UnregisterResponse>, ApiError>
where
    S: AgentStore + 'static,
    F: CardFetcher + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Query(params) = query?;
    let raw_url = required(params.url, "url")?;
    let url = registry.unregister(&raw_url)?;
    Ok(Json(UnregisterResponse {
        status: "unregistered".to_owned(),
        url: url.as_str().to_owned(),
    }))
}
