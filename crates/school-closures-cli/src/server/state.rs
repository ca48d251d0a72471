//! Application state for the web server.

use std::sync::Arc;
use tokio::sync::RwLock;

use school_closures::{FileStorage, Registry};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The registry being served. Submissions take the write lock.
    pub registry: Arc<RwLock<Registry<FileStorage>>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(registry: Registry<FileStorage>) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
        }
    }
}
