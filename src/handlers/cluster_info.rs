use crate::error::ApiError;
use crate::models::ClusterSlotResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET / handler - Slot-to-node topology of the cluster, as reported by the cluster
#[utoipa::path(
    get,
    path = routes::CLUSTER_INFO,
    responses(
        (status = 200, description = "Cluster slot ranges and their nodes", body = [ClusterSlotResponse]),
        (status = 500, description = "Cluster error", body = String, content_type = "text/plain")
    ),
    tag = "cluster"
)]
pub async fn cluster_info_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<ClusterSlotResponse>>), ApiError> {
    tracing::info!("Getting cluster info");

    let slots = state
        .backend
        .cluster_slots()
        .await
        .inspect_err(|e| tracing::error!("Failed to get cluster slots: {:#}", e))?;

    let response: Vec<ClusterSlotResponse> = slots.into_iter().map(Into::into).collect();
    tracing::debug!("Cluster reports {} slot ranges", response.len());

    Ok((StatusCode::OK, Json(response)))
}
