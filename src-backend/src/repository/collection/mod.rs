//! Collection Repository Module
//!
//! Collection repository functionality split into specialized sub-modules:
//! - collection_repo: Core CRUD operations
//! - collection_positioning: Position management

mod collection_repo;
mod collection_positioning;

pub use collection_repo::CollectionRepository;
