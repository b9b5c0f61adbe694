use std::sync::Arc;

use fablehouse_pipeline::Services;

use crate::config::ServerConfig;

/// State handed to every handler through `State<AppState>`.
///
/// Cloning is cheap: the pool is a handle and the rest sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fablehouse_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Generation, storage and email collaborators for the pipeline.
    pub services: Arc<Services>,
}
