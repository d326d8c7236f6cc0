use crate::config::Config;
use crate::memorydb::KvBackend;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn KvBackend>,
    pub config: Arc<Config>,
}
