use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Error type for the key-value endpoints
///
/// Every backend failure is turned into an HTTP response here. Nothing a
/// single request does can take the server down.
#[derive(Debug)]
pub enum ApiError {
    /// Key does not exist in the cluster
    KeyNotFound(String),
    /// Cluster operation failed (network, auth, timeout, ...)
    Backend(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::KeyNotFound(_) => StatusCode::NOT_FOUND.into_response(),
            ApiError::Backend(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err)).into_response()
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Backend(err)
    }
}
