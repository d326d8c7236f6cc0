use utoipa::OpenApi;

use crate::error::{HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{ClusterNodeResponse, ClusterSlotResponse, KeyValue};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "rust-memorydb-kv API",
        version = "1.0.0",
        description = "HTTP access to keys and slot topology of a MemoryDB cluster"
    ),
    paths(
        handlers::health::health_handler,
        handlers::set::set_handler,
        handlers::get::get_handler,
        handlers::cluster_info::cluster_info_handler
    ),
    components(
        schemas(
            KeyValue,
            ClusterSlotResponse,
            ClusterNodeResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "kv", description = "Key-value operations"),
        (name = "cluster", description = "Cluster topology")
    )
)]
pub struct ApiDoc;
