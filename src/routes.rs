// Route path constants - single source of truth for all API paths

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{cluster_info_handler, get_handler, health_handler, set_handler};
use crate::state::AppState;

pub const CLUSTER_INFO: &str = "/";
pub const KV_ITEM: &str = "/{key}";

// Operational endpoints span two segments so they never shadow a key
pub const HEALTH: &str = "/_/health";
pub const OPENAPI: &str = "/_/openapi.json";
pub const SWAGGER_UI: &str = "/_/docs";

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(CLUSTER_INFO, get(cluster_info_handler))
        .route(KV_ITEM, post(set_handler).get(get_handler))
        .route(HEALTH, get(health_handler))
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
