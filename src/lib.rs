//! Site Admin Console
//!
//! Ordered content lists of the admin console (hero slides, featured
//! programs, student stories, quick links, program tags):
//! - ordering: in-memory move and drag algorithms
//! - store: the working copy of one list and its sync state
//! - sync: optimistic persistence through an `OrderStore`
//! - commands: backing stores (mock, embedded SQLite, HTTP)

pub mod models;
pub mod ordering;
pub mod store;
pub mod sync;
pub mod context;
pub mod config;
pub mod commands;

pub use commands::OrderStore;
pub use context::{Toast, ToastLevel, Toasts};
pub use ordering::Direction;
pub use store::{OrderedList, SyncState};
pub use sync::{FailurePolicy, ListController, SaveMode, SyncOptions, SyncOutcome};
