//! `KvBackend` doubles for exercising handlers without a cluster.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::tests::test_config;
use crate::memorydb::{KvBackend, SlotNode, SlotRange};
use crate::state::AppState;

/// Single-node cluster kept in a map
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    inner: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

#[async_trait]
impl KvBackend for InMemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.inner.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.inner
            .lock()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn cluster_slots(&self) -> Result<Vec<SlotRange>> {
        Ok(vec![SlotRange {
            start: 0,
            end: 16383,
            nodes: vec![SlotNode {
                id: "in-memory".to_string(),
                addr: "127.0.0.1:6379".to_string(),
            }],
        }])
    }

    async fn key_slot(&self, _key: &str) -> Result<u16> {
        Ok(0)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Cluster that rejects every call
pub struct FailingBackend;

#[async_trait]
impl KvBackend for FailingBackend {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Err(anyhow!("connection refused"))
    }

    async fn set(&self, _key: &str, _value: &[u8]) -> Result<()> {
        Err(anyhow!("connection refused"))
    }

    async fn cluster_slots(&self) -> Result<Vec<SlotRange>> {
        Err(anyhow!("connection refused"))
    }

    async fn key_slot(&self, _key: &str) -> Result<u16> {
        Err(anyhow!("connection refused"))
    }

    async fn ping(&self) -> Result<()> {
        Err(anyhow!("connection refused"))
    }
}

/// Working cluster whose `CLUSTER KEYSLOT` always fails
#[derive(Clone, Default)]
pub struct NoKeySlotBackend {
    store: InMemoryBackend,
}

#[async_trait]
impl KvBackend for NoKeySlotBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.store.set(key, value).await
    }

    async fn cluster_slots(&self) -> Result<Vec<SlotRange>> {
        self.store.cluster_slots().await
    }

    async fn key_slot(&self, _key: &str) -> Result<u16> {
        Err(anyhow!("ERR unknown subcommand 'KEYSLOT'"))
    }

    async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }
}

pub fn state_with(backend: impl KvBackend + 'static) -> AppState {
    AppState {
        backend: Arc::new(backend),
        config: Arc::new(test_config()),
    }
}
