//! # Database State
//!
//! Wraps the `Database` connection handed to every command.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn search_customers(db: &DbState, name: &str) -> Result<Vec<CustomerDto>, ApiError> {
//!     let customers = db.inner().customers().search_by_name(name).await?;
//!     Ok(customers.into_iter().map(CustomerDto::from).collect())
//! }
//! ```

use laundry_db::{Database, DbConfig};
use std::path::Path;
use tracing::info;

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Opens (creating if needed) the database file and applies migrations.
    pub async fn open(path: &Path) -> Result<Self, ApiError> {
        let db = Database::new(DbConfig::new(path)).await?;
        info!(db_path = %path.display(), "Database connected and migrations applied");
        Ok(DbState::new(db))
    }

    /// Throwaway database for tests.
    pub async fn in_memory() -> Result<Self, ApiError> {
        let db = Database::new(DbConfig::in_memory()).await?;
        Ok(DbState::new(db))
    }

    pub fn inner(&self) -> &Database {
        &self.db
    }
}
