mod api_doc;
mod config;
mod error;
mod handlers;
mod memorydb;
mod models;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use config::Config;
use memorydb::MemoryDbClient;
use state::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("rust-memorydb-kv starting");

    // Nothing is bound until the cluster has answered a PING
    let config = Config::from_env()?;
    config.log_startup();

    let memorydb = MemoryDbClient::from_config(&config).await?;

    let bind_addr = config.bind_addr();
    let state = AppState {
        backend: Arc::new(memorydb),
        config: Arc::new(config),
    };
    let app = routes::router(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("Started HTTP server on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
