use std::sync::Arc;

use crate::db::DatabaseClient;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseClient>,
}

impl AppState {
    pub fn new(db: Arc<dyn DatabaseClient>) -> Self {
        Self { db }
    }
}
