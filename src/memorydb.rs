use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use redis::cluster::ClusterClient;
use redis::cluster_async::ClusterConnection;
use redis::{AsyncCommands, Value};

use crate::config::Config;

/// A node serving a slot range, as reported by `CLUSTER SLOTS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotNode {
    pub id: String,
    pub addr: String,
}

/// A contiguous range of hash slots and the nodes that own it.
/// The first node is the primary, the rest are replicas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRange {
    pub start: u16,
    pub end: u16,
    pub nodes: Vec<SlotNode>,
}

/// Operations the HTTP layer needs from the key-value cluster.
///
/// Implementations must be safe to call from many handlers at once.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Read the raw bytes stored under a key. `Ok(None)` means the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write a key with no expiry, replacing any previous value.
    /// The bytes are stored as given.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Current slot ownership map of the cluster.
    async fn cluster_slots(&self) -> Result<Vec<SlotRange>>;

    /// Hash slot a key belongs to.
    async fn key_slot(&self, key: &str) -> Result<u16>;

    /// Liveness check.
    async fn ping(&self) -> Result<()>;
}

/// Shareable MemoryDB cluster client for use across async handlers.
///
/// Slot lookup, MOVED/ASK redirects and TLS are handled by the `redis`
/// cluster connection. The connection is multiplexed, so each call works
/// on a cheap clone of it.
#[derive(Clone)]
pub struct MemoryDbClient {
    connection: ClusterConnection,
}

impl MemoryDbClient {
    /// Connect to the cluster described by `config` and verify it answers `PING`.
    ///
    /// # Errors
    /// Returns an error if the client cannot be built, the connection cannot be
    /// established, or the ping fails. The caller is expected to abort startup.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let url = config.cluster_url();
        tracing::info!("Connecting to MemoryDB cluster at: {}", config.cluster_endpoint);

        let mut builder = ClusterClient::builder(vec![url])
            .username(config.username.clone())
            .password(config.password.clone());
        if config.read_from_replicas {
            builder = builder.read_from_replicas();
        }

        let client = builder
            .build()
            .context("Failed to build MemoryDB cluster client")?;

        let connection = client
            .get_async_connection()
            .await
            .context("Failed to connect to MemoryDB cluster")?;

        let memorydb = Self { connection };
        memorydb
            .ping()
            .await
            .context("Failed to connect to MemoryDB cluster")?;

        tracing::info!("Successfully connected to MemoryDB cluster");
        Ok(memorydb)
    }
}

#[async_trait]
impl KvBackend for MemoryDbClient {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut con = self.connection.clone();
        let value: Option<Vec<u8>> = con
            .get(key)
            .await
            .context("Failed to read key from MemoryDB")?;

        tracing::debug!("Read key {} (found: {})", key, value.is_some());
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut con = self.connection.clone();
        let _: () = con
            .set(key, value)
            .await
            .context("Failed to write key to MemoryDB")?;

        tracing::debug!("Wrote key {}", key);
        Ok(())
    }

    async fn cluster_slots(&self) -> Result<Vec<SlotRange>> {
        let mut con = self.connection.clone();
        let reply: Value = redis::cmd("CLUSTER")
            .arg("SLOTS")
            .query_async(&mut con)
            .await
            .context("Failed to fetch cluster slots from MemoryDB")?;

        parse_cluster_slots(reply)
    }

    async fn key_slot(&self, key: &str) -> Result<u16> {
        let mut con = self.connection.clone();
        let slot: u16 = redis::cmd("CLUSTER")
            .arg("KEYSLOT")
            .arg(key)
            .query_async(&mut con)
            .await
            .context("Failed to fetch key slot from MemoryDB")?;
        Ok(slot)
    }

    async fn ping(&self) -> Result<()> {
        let mut con = self.connection.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut con)
            .await
            .context("PING failed")?;

        tracing::debug!("PING answered with {}", pong);
        Ok(())
    }
}

/// Decode a `CLUSTER SLOTS` reply:
/// `[[start, end, [host, port, id, ...], [host, port, id, ...]...], ...]`
fn parse_cluster_slots(reply: Value) -> Result<Vec<SlotRange>> {
    match reply {
        Value::Array(entries) => entries.iter().map(parse_slot_range).collect(),
        other => bail!("Unexpected CLUSTER SLOTS reply: {:?}", other),
    }
}

fn parse_slot_range(entry: &Value) -> Result<SlotRange> {
    let items = match entry {
        Value::Array(items) => items,
        other => bail!("Unexpected slot range entry: {:?}", other),
    };
    if items.len() < 3 {
        bail!("Slot range entry has {} elements, expected at least 3", items.len());
    }

    let start: u16 = redis::from_redis_value(&items[0]).context("Invalid slot range start")?;
    let end: u16 = redis::from_redis_value(&items[1]).context("Invalid slot range end")?;
    let nodes = items[2..]
        .iter()
        .map(parse_slot_node)
        .collect::<Result<Vec<_>>>()?;

    Ok(SlotRange { start, end, nodes })
}

fn parse_slot_node(node: &Value) -> Result<SlotNode> {
    let fields = match node {
        Value::Array(fields) => fields,
        other => bail!("Unexpected slot node entry: {:?}", other),
    };
    if fields.len() < 2 {
        bail!("Slot node entry has {} elements, expected at least 2", fields.len());
    }

    let host: String = redis::from_redis_value(&fields[0]).context("Invalid node host")?;
    let port: u16 = redis::from_redis_value(&fields[1]).context("Invalid node port")?;
    // Node IDs were added in Redis 4.0
    let id: String = match fields.get(2) {
        Some(value) => redis::from_redis_value(value).context("Invalid node id")?,
        None => String::new(),
    };

    Ok(SlotNode {
        id,
        addr: join_host_port(&host, port),
    })
}

fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}
