//! HTTP error mapping for registry failures.

use crate::registry::services::RegistryServiceError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request input.
    #[error("{0}")]
    Validation(String),

    /// The agent answered with something that is not a valid card.
    #[error("{0}")]
    InvalidCard(String),

    /// The agent's card could not be retrieved.
    #[error("{0}")]
    BadGateway(String),

    /// No agent is registered under the requested URL.
    #[error("Agent not found")]
    NotFound,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub detail: String,
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidCard(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<RegistryServiceError> for ApiError {
    fn from(err: RegistryServiceError) -> Self {
        match err {
            RegistryServiceError::Validation(domain) => Self::Validation(domain.to_string()),
            RegistryServiceError::Fetch(fetch) if fetch.is_invalid_card() => {
                Self::InvalidCard(fetch.to_string())
            }
            RegistryServiceError::Fetch(fetch) => Self::BadGateway(fetch.to_string()),
            RegistryServiceError::NotFound(_) => Self::NotFound,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
