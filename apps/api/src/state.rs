use std::path::PathBuf;

use sqlx::SqlitePool;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Each handler acquires its own connection from the pool for one unit of work.
    pub db: SqlitePool,
    pub config: Config,
}

impl AppState {
    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.upload_dir)
    }
}

#[cfg(test)]
pub async fn test_state(upload_dir: &std::path::Path) -> AppState {
    AppState {
        db: crate::db::test_pool().await,
        config: Config {
            database_url: "sqlite::memory:".to_string(),
            upload_dir: upload_dir.to_string_lossy().into_owned(),
            max_upload_bytes: crate::config::DEFAULT_MAX_UPLOAD_BYTES,
            port: 0,
            rust_log: "debug".to_string(),
        },
    }
}
