//! Backing Store Bindings
//!
//! Where an admin list loads from and saves its order to. Errors are plain
//! strings, ready to be shown in a toast.

mod local;
mod embedded;
mod http;

use async_trait::async_trait;

use crate::models::{OrderEntry, Orderable};

pub use local::{demo_entries, LocalStore, DEFAULT_LATENCY};
pub use embedded::EmbeddedStore;
pub use http::HttpStore;

/// Persistence boundary of one orderable list
#[async_trait]
pub trait OrderStore<T: Orderable>: Send + Sync {
    /// Fetch the stored items
    async fn load(&self) -> Result<Vec<T>, String>;

    /// Persist a complete order in one batch
    async fn save_order(&self, order: &[OrderEntry<T::Id>]) -> Result<(), String>;
}
