//! Collection Repository - Core CRUD Operations
//!
//! SQLite-backed storage for the entries of one collection. All collections
//! share the `entries` table; the payload is stored as JSON.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::marker::PhantomData;

use crate::domain::{CollectionKind, CollectionPayload, DomainError, DomainResult, Entry};
use super::super::db::SharedConnection;
use super::super::traits::Repository;

/// SQLite implementation of a collection repository
pub struct CollectionRepository<P> {
    pub(super) conn: SharedConnection,
    _payload: PhantomData<fn() -> P>,
}

impl<P: CollectionPayload> CollectionRepository<P> {
    pub fn new(conn: SharedConnection) -> Self {
        Self {
            conn,
            _payload: PhantomData,
        }
    }

    pub fn kind(&self) -> CollectionKind {
        P::KIND
    }

    /// Number of entries in the collection
    pub async fn count(&self) -> DomainResult<u32> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        Ok(ordered_ids(conn, P::KIND)?.len() as u32)
    }
}

pub(super) fn not_initialized() -> DomainError {
    DomainError::Internal("Database not initialized".to_string())
}

pub(super) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Ids of a collection in display order
pub(super) fn ordered_ids(conn: &Connection, kind: CollectionKind) -> DomainResult<Vec<u32>> {
    let mut stmt = conn.prepare("SELECT id FROM entries WHERE collection = ?1 ORDER BY position, id")?;
    let ids = stmt
        .query_map(params![kind.as_str()], |row| row.get::<_, u32>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids)
}

pub(super) fn next_position_in(conn: &Connection, kind: CollectionKind) -> DomainResult<u32> {
    let next: i64 = conn.query_row(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM entries WHERE collection = ?1",
        params![kind.as_str()],
        |row| row.get(0),
    )?;
    Ok(next.max(0) as u32)
}

/// Rewrite positions of `ids` to their index, in one transaction
pub(super) fn write_positions(conn: &Connection, ids: &[u32]) -> DomainResult<()> {
    let tx = conn.unchecked_transaction()?;
    let now = now_millis();
    for (new_pos, id) in ids.iter().enumerate() {
        tx.execute(
            "UPDATE entries SET position = ?1, updated_at = ?2 WHERE id = ?3",
            params![new_pos as i64, now, *id],
        )?;
    }
    tx.commit()?;
    Ok(())
}

pub(super) fn reindex_in(conn: &Connection, kind: CollectionKind) -> DomainResult<()> {
    let ids = ordered_ids(conn, kind)?;
    write_positions(conn, &ids)
}

/// Convert a database row (id, position, payload) to an entry
fn row_to_entry<P: CollectionPayload>(row: (u32, u32, String)) -> DomainResult<Entry<P>> {
    let (id, position, payload) = row;
    let payload: P = serde_json::from_str(&payload)
        .map_err(|e| DomainError::Internal(format!("Corrupt payload for entry {}: {}", id, e)))?;
    Ok(Entry::new(id, position, payload))
}

fn select_entry<P: CollectionPayload>(conn: &Connection, id: u32) -> DomainResult<Option<Entry<P>>> {
    let row = conn
        .query_row(
            "SELECT id, position, payload FROM entries WHERE id = ?1 AND collection = ?2",
            params![id, P::KIND.as_str()],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()?;
    row.map(row_to_entry).transpose()
}

#[async_trait]
impl<P: CollectionPayload> Repository<Entry<P>> for CollectionRepository<P> {
    /// Appends at the end of the collection; the given id and position are ignored
    async fn create(&self, entity: &Entry<P>) -> DomainResult<Entry<P>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let position = next_position_in(conn, P::KIND)?;
        let payload = serde_json::to_string(&entity.payload)?;
        let now = now_millis();
        conn.execute(
            "INSERT INTO entries (collection, position, payload, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
            params![P::KIND.as_str(), position, payload, now],
        )?;

        let id = conn.last_insert_rowid() as u32;
        log::debug!("Created {} entry {} at position {}", P::KIND, id, position);
        Ok(Entry::new(id, position, entity.payload.clone()))
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Entry<P>>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        select_entry(conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<Entry<P>>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn.prepare(
            "SELECT id, position, payload FROM entries WHERE collection = ?1 ORDER BY position ASC, id ASC",
        )?;
        let rows = stmt
            .query_map(params![P::KIND.as_str()], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?
            .collect::<Result<Vec<(u32, u32, String)>, _>>()?;

        rows.into_iter().map(row_to_entry).collect()
    }

    /// Updates the payload only. Positions change through `PositioningOperations`.
    async fn update(&self, entity: &Entry<P>) -> DomainResult<Entry<P>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let payload = serde_json::to_string(&entity.payload)?;
        let changed = conn.execute(
            "UPDATE entries SET payload = ?1, updated_at = ?2 WHERE id = ?3 AND collection = ?4",
            params![payload, now_millis(), entity.id, P::KIND.as_str()],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("{} entry {}", P::KIND, entity.id)));
        }

        select_entry(conn, entity.id)?
            .ok_or_else(|| DomainError::NotFound(format!("{} entry {}", P::KIND, entity.id)))
    }

    /// Deletes and renumbers the remaining entries so positions stay dense
    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn.execute(
            "DELETE FROM entries WHERE id = ?1 AND collection = ?2",
            params![id, P::KIND.as_str()],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("{} entry {}", P::KIND, id)));
        }

        reindex_in(conn, P::KIND)
    }
}
