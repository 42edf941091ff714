//! In-process store backed by the SQLite backend

use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;

use site_admin_backend::{commands, AppState};

use super::OrderStore;
use crate::models::{CollectionPayload, Entry, OrderEntry};

pub struct EmbeddedStore<P> {
    state: Arc<AppState>,
    _payload: PhantomData<fn() -> P>,
}

impl<P: CollectionPayload> EmbeddedStore<P> {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            _payload: PhantomData,
        }
    }
}

#[async_trait]
impl<P: CollectionPayload> OrderStore<Entry<P>> for EmbeddedStore<P> {
    async fn load(&self) -> Result<Vec<Entry<P>>, String> {
        commands::list_entries::<P>(&self.state).await
    }

    async fn save_order(&self, order: &[OrderEntry]) -> Result<(), String> {
        commands::reorder_entries::<P>(&self.state, order.to_vec())
            .await
            .map(|_| ())
    }
}
