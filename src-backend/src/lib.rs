//! Site Admin Backend
//!
//! Layered architecture:
//! - domain: Orderable entries and collection payloads
//! - repository: SQLite data access
//! - commands: handlers called by the admin console

use std::path::PathBuf;

pub mod domain;
pub mod repository;
pub mod commands;

use domain::CollectionPayload;
use repository::{init_db, CollectionRepository, DbState};

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
    pub db_path: PathBuf,
}

impl AppState {
    /// Open (and migrate) the database at `db_path`
    pub async fn open(db_path: PathBuf) -> Result<Self, String> {
        log::info!("Opening site admin database at {}", db_path.display());
        let db_state = init_db(&db_path).await.map_err(|e| {
            log::error!("DB init failed: {}", e);
            e
        })?;
        Ok(Self { db_state, db_path })
    }

    /// Repository for the collection holding `P`
    pub fn repository<P: CollectionPayload>(&self) -> CollectionRepository<P> {
        CollectionRepository::new(self.db_state.connection())
    }
}
