//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
pub mod db;
pub mod collection;


pub use traits::{Repository, PositioningOperations};
pub use db::{init_db, DbState, SharedConnection};
pub use collection::CollectionRepository;
