//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult, OrderEntry, Orderable};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Position management for repositories of orderable entities
#[async_trait]
pub trait PositioningOperations<T: Orderable>: Repository<T> {
    /// Position a newly created entity gets (one past the last)
    async fn next_position(&self) -> DomainResult<u32>;

    /// Renumber positions to be sequential (0, 1, 2, ...) keeping their order
    async fn reindex(&self) -> DomainResult<()>;

    /// Move one entity to `new_position`, shifting the ones in between
    async fn move_entry(&self, id: T::Id, new_position: u32) -> DomainResult<()>;

    /// Replace the whole order in one batch.
    ///
    /// `entries` must name every stored entity exactly once. Positions are
    /// stored densely in the requested order.
    async fn apply_order(&self, entries: &[OrderEntry<T::Id>]) -> DomainResult<Vec<OrderEntry<T::Id>>>;
}
