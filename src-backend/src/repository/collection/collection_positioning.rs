//! Collection Positioning Operations
//!
//! Operations for managing entry positions within a collection.

use async_trait::async_trait;
use rusqlite::params;
use std::collections::HashSet;

use crate::domain::{CollectionPayload, DomainError, DomainResult, Entry, OrderEntry};
use super::super::traits::PositioningOperations;
use super::collection_repo::{
    next_position_in, not_initialized, now_millis, ordered_ids, reindex_in, write_positions,
    CollectionRepository,
};

#[async_trait]
impl<P: CollectionPayload> PositioningOperations<Entry<P>> for CollectionRepository<P> {
    async fn next_position(&self) -> DomainResult<u32> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        next_position_in(conn, P::KIND)
    }

    async fn reindex(&self) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        reindex_in(conn, P::KIND)
    }

    async fn move_entry(&self, id: u32, new_position: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        // Start from a dense order so the shift ranges below are exact
        reindex_in(conn, P::KIND)?;

        let old_position: u32 = conn
            .query_row(
                "SELECT position FROM entries WHERE id = ?1 AND collection = ?2",
                params![id, P::KIND.as_str()],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DomainError::NotFound(format!("{} entry {}", P::KIND, id))
                }
                other => other.into(),
            })?;

        let last = next_position_in(conn, P::KIND)?.saturating_sub(1);
        let new_position = new_position.min(last);
        if old_position == new_position {
            return Ok(());
        }

        let tx = conn.unchecked_transaction()?;
        if new_position < old_position {
            // Moving up: shift entries in [new_position, old_position) down by +1
            tx.execute(
                "UPDATE entries SET position = position + 1 WHERE collection = ?1 AND position >= ?2 AND position < ?3",
                params![P::KIND.as_str(), new_position, old_position],
            )?;
        } else {
            // Moving down: shift entries in (old_position, new_position] up by -1
            tx.execute(
                "UPDATE entries SET position = position - 1 WHERE collection = ?1 AND position > ?2 AND position <= ?3",
                params![P::KIND.as_str(), old_position, new_position],
            )?;
        }
        tx.execute(
            "UPDATE entries SET position = ?1, updated_at = ?2 WHERE id = ?3",
            params![new_position, now_millis(), id],
        )?;
        tx.commit()?;

        log::debug!("Moved {} entry {} from {} to {}", P::KIND, id, old_position, new_position);
        Ok(())
    }

    async fn apply_order(&self, entries: &[OrderEntry]) -> DomainResult<Vec<OrderEntry>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let stored: HashSet<u32> = ordered_ids(conn, P::KIND)?.into_iter().collect();
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in entries {
            if !stored.contains(&entry.id) {
                return Err(DomainError::InvalidInput(format!(
                    "{} entry {} does not exist",
                    P::KIND,
                    entry.id
                )));
            }
            if !seen.insert(entry.id) {
                return Err(DomainError::InvalidInput(format!(
                    "{} entry {} listed twice",
                    P::KIND,
                    entry.id
                )));
            }
        }
        if seen.len() != stored.len() {
            return Err(DomainError::Conflict(format!(
                "{} order names {} of {} entries",
                P::KIND,
                seen.len(),
                stored.len()
            )));
        }

        // Stable: equal positions keep the order they were sent in
        let mut requested = entries.to_vec();
        requested.sort_by_key(|entry| entry.position);
        let ids: Vec<u32> = requested.iter().map(|entry| entry.id).collect();
        write_positions(conn, &ids)?;

        log::info!("Applied order of {} {} entries", ids.len(), P::KIND);
        Ok(ids
            .into_iter()
            .enumerate()
            .map(|(position, id)| OrderEntry::new(id, position as u32))
            .collect())
    }
}
