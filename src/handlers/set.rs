use crate::error::ApiError;
use crate::routes;
use crate::state::AppState;
use axum::{body::Bytes, extract::Path, extract::State, http::StatusCode};

/// POST /{key} handler - Store the raw request body under a key
///
/// The body bytes are stored unchanged, without JSON or UTF-8 decoding.
/// The value never expires.
#[utoipa::path(
    post,
    path = routes::KV_ITEM,
    params(
        ("key" = String, Path, description = "Key to write")
    ),
    request_body(content = String, content_type = "text/plain", description = "Raw value"),
    responses(
        (status = 200, description = "Value stored"),
        (status = 500, description = "Cluster error", body = String, content_type = "text/plain")
    ),
    tag = "kv"
)]
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    tracing::info!("Setting key {} ({} bytes)", key, body.len());

    state
        .backend
        .set(&key, &body)
        .await
        .inspect_err(|e| tracing::error!("Failed to set key {}: {:#}", key, e))?;

    tracing::info!("Successfully set key {}", key);
    Ok(StatusCode::OK)
}
