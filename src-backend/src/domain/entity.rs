//! Domain Layer - Core Entity Traits
//!
//! `Entity` is the basic contract for all domain records: a unique ID and
//! thread-safety. `Orderable` adds the persisted display position shared by
//! every admin collection.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync + std::fmt::Debug;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// An entity displayed in ascending `position` order.
///
/// Positions are 0-based and dense after every reorder. Everything else on
/// the implementing type is opaque to the ordering code.
pub trait Orderable: Entity {
    fn position(&self) -> u32;

    fn set_position(&mut self, position: u32);
}

/// One `{id, position}` pair of a persisted reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderEntry<I = u32> {
    pub id: I,
    pub position: u32,
}

impl<I> OrderEntry<I> {
    pub fn new(id: I, position: u32) -> Self {
        Self { id, position }
    }
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::InvalidInput(format!("payload: {}", e))
    }
}
