use crate::error::ApiError;
use crate::models::KeyValue;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// GET /{key} handler - Read a value
///
/// Stored bytes that are not valid UTF-8 are rendered with U+FFFD in the JSON body.
#[utoipa::path(
    get,
    path = routes::KV_ITEM,
    params(
        ("key" = String, Path, description = "Key to read")
    ),
    responses(
        (status = 200, description = "Key found", body = KeyValue),
        (status = 404, description = "Key not found, empty body"),
        (status = 500, description = "Cluster error", body = String, content_type = "text/plain")
    ),
    tag = "kv"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<(StatusCode, Json<KeyValue>), ApiError> {
    match state.backend.key_slot(&key).await {
        Ok(slot) => tracing::info!("Getting value for key {} that belongs to slot {}", key, slot),
        Err(e) => tracing::warn!("Could not resolve slot for key {}: {:#}", key, e),
    }

    let value = state
        .backend
        .get(&key)
        .await
        .inspect_err(|e| tracing::error!("Failed to get key {}: {:#}", key, e))?;

    match value {
        Some(value) => {
            tracing::info!("Got value for key {}", key);
            let value = String::from_utf8_lossy(&value).into_owned();
            Ok((StatusCode::OK, Json(KeyValue { key, value })))
        }
        None => {
            tracing::info!("Key not found: {}", key);
            Err(ApiError::KeyNotFound(key))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::KeyValue;
    use crate::routes;
    use crate::testing::{FailingBackend, InMemoryBackend, NoKeySlotBackend, state_with};
    use axum::{body::Body, http::Request, http::StatusCode, Router};
    use tower::ServiceExt;

    fn setup_test_app() -> Router {
        routes::router(state_with(InMemoryBackend::default()))
    }

    async fn set(app: &Router, key: &str, value: impl Into<Body>) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/{}", key))
                    .body(value.into())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    async fn get(app: &Router, key: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/{}", key))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_get_endpoint_success() {
        let app = setup_test_app();
        set(&app, "hello", "world").await;

        let (status, body) = get(&app, "hello").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, br#"{"Key":"hello","Value":"world"}"#);
    }

    #[tokio::test]
    async fn test_get_endpoint_not_found() {
        let app = setup_test_app();

        let (status, body) = get(&app, "missing-key").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_get_endpoint_last_write_wins() {
        let app = setup_test_app();
        set(&app, "counter", "one").await;
        set(&app, "counter", "two").await;

        let (status, body) = get(&app, "counter").await;

        assert_eq!(status, StatusCode::OK);
        let kv: KeyValue = serde_json::from_slice(&body).unwrap();
        assert_eq!(kv.value, "two");
    }

    #[tokio::test]
    async fn test_get_endpoint_empty_value() {
        let app = setup_test_app();
        set(&app, "blank", "").await;

        let (status, body) = get(&app, "blank").await;

        assert_eq!(status, StatusCode::OK);
        let kv: KeyValue = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            kv,
            KeyValue {
                key: "blank".to_string(),
                value: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_get_endpoint_percent_encoded_key() {
        let app = setup_test_app();
        set(&app, "user%3A42", "ada").await;

        let (status, body) = get(&app, "user%3A42").await;

        assert_eq!(status, StatusCode::OK);
        let kv: KeyValue = serde_json::from_slice(&body).unwrap();
        assert_eq!(kv.key, "user:42");
        assert_eq!(kv.value, "ada");
    }

    #[tokio::test]
    async fn test_get_endpoint_binary_value() {
        let app = setup_test_app();
        set(&app, "bytes", vec![b'o', b'k', 0xff]).await;

        let (status, body) = get(&app, "bytes").await;

        assert_eq!(status, StatusCode::OK);
        let kv: KeyValue = serde_json::from_slice(&body).unwrap();
        assert_eq!(kv.value, "ok\u{FFFD}");
    }

    #[tokio::test]
    async fn test_get_endpoint_key_slot_failure_still_reads() {
        let app = routes::router(state_with(NoKeySlotBackend::default()));
        set(&app, "hello", "world").await;

        let (status, body) = get(&app, "hello").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, br#"{"Key":"hello","Value":"world"}"#);
    }

    #[tokio::test]
    async fn test_get_endpoint_backend_failure() {
        let app = routes::router(state_with(FailingBackend));

        let (status, body) = get(&app, "hello").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(String::from_utf8_lossy(&body).contains("connection refused"));
    }
}
