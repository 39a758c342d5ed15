//! # Database State
//!
//! Wraps the `Database` connection for use in commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn list_sales(db: &DbState) -> Result<Vec<SaleRow>, ApiError> {
//!     let sales = db.inner().sales().list_all().await?;
//!     Ok(sales.iter().map(SaleRow::from).collect())
//! }
//! ```

use std::path::Path;
use tracing::info;

use crate::error::ApiError;
use jewel_db::{Database, DbConfig};

/// Wrapper around `Database` for command access.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Opens (creating if needed) the database file and applies migrations.
    pub async fn open(path: &Path) -> Result<Self, ApiError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::config(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let db = Database::new(DbConfig::new(path)).await?;
        info!(path = %path.display(), "Database connected and migrations applied");

        Ok(DbState::new(db))
    }

    /// Private in-memory database, used by tests.
    pub async fn in_memory() -> Result<Self, ApiError> {
        Ok(DbState::new(Database::new(DbConfig::in_memory()).await?))
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
