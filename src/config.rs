use std::env;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub cluster_endpoint: String,
    pub username: String,
    pub password: String,
    pub read_from_replicas: bool,
    pub service_port: u16,
    pub service_host: String,
}

/// Read a variable that must be present and non-empty
fn required(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .with_context(|| format!("{} environment variable is required", name))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let cluster_endpoint = required("MEMORYDB_CLUSTER_ENDPOINT")?;
        let username = required("MEMORYDB_USERNAME")?;
        let password = required("MEMORYDB_PASSWORD")?;

        let read_from_replicas = env::var("MEMORYDB_READ_FROM_REPLICAS")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .context("MEMORYDB_READ_FROM_REPLICAS must be 'true' or 'false'")?;

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Config {
            cluster_endpoint,
            username,
            password,
            read_from_replicas,
            service_port,
            service_host,
        })
    }

    /// Connection URL for the cluster configuration endpoint.
    ///
    /// A bare `host:port` is dialed over TLS. An explicit `redis://` or
    /// `rediss://` URL is passed through untouched.
    pub fn cluster_url(&self) -> String {
        if self.cluster_endpoint.contains("://") {
            self.cluster_endpoint.clone()
        } else {
            format!("rediss://{}", self.cluster_endpoint)
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  MemoryDB endpoint: {}", self.cluster_endpoint);
        tracing::info!("  MemoryDB username: {}", self.username);
        tracing::info!("  MemoryDB password: <redacted>");
        tracing::info!("  Read from replicas: {}", self.read_from_replicas);
        tracing::info!("  Service listening on: {}", self.bind_addr());
    }
}
