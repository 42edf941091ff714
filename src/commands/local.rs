//! In-memory mock store
//!
//! Stands in for the remote API in demos and tests. Every call waits a fixed
//! latency to behave like a network round trip.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use super::OrderStore;
use crate::models::{CollectionKind, CollectionPayload, Entry, LocalizedText, OrderEntry, Orderable};

/// Simulated round trip of the mock API
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

pub struct LocalStore<T: Orderable> {
    items: Mutex<Vec<T>>,
    latency: Duration,
    offline: AtomicBool,
    fail_next: AtomicBool,
    saves: AtomicUsize,
    last_payload: Mutex<Option<Vec<OrderEntry<T::Id>>>>,
}

impl<T: Orderable> LocalStore<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self::with_latency(items, DEFAULT_LATENCY)
    }

    pub fn with_latency(items: Vec<T>, latency: Duration) -> Self {
        Self {
            items: Mutex::new(items),
            latency,
            offline: AtomicBool::new(false),
            fail_next: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }

    /// Every call fails until switched back online
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// The next call fails once
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub async fn last_payload(&self) -> Option<Vec<OrderEntry<T::Id>>> {
        self.last_payload.lock().await.clone()
    }

    /// Stored items in stored order
    pub async fn snapshot(&self) -> Vec<T> {
        self.items.lock().await.clone()
    }

    async fn round_trip(&self) -> Result<(), String> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.offline.load(Ordering::SeqCst) || self.fail_next.swap(false, Ordering::SeqCst) {
            return Err("Network error: request failed".to_string());
        }
        Ok(())
    }
}

impl<P: CollectionPayload> LocalStore<Entry<P>> {
    /// Mock store pre-filled with sample entries of `P`'s collection
    pub fn with_demo_entries(latency: Duration) -> Self {
        Self::with_latency(demo_entries::<P>(), latency)
    }
}

/// Sample titles (English, Chinese) per collection
fn demo_titles(kind: CollectionKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        CollectionKind::HeroSlides => &[
            ("Study in Shanghai", "在上海留学"),
            ("Summer Chinese Camp", "暑期中文营"),
            ("Scholarships Open", "奖学金申请开放"),
        ],
        CollectionKind::FeaturedPrograms => &[
            ("Chinese Language Program", "汉语言项目"),
            ("MBA in English", "英文授课MBA"),
            ("Foundation Year", "预科项目"),
        ],
        CollectionKind::StudentStories => &[
            ("Anna from Germany", "来自德国的安娜"),
            ("Kofi from Ghana", "来自加纳的科菲"),
            ("Mai from Vietnam", "来自越南的梅"),
        ],
        CollectionKind::QuickLinks => &[
            ("Apply Now", "立即申请"),
            ("Visa Guide", "签证指南"),
            ("Contact Us", "联系我们"),
        ],
        CollectionKind::ProgramTags => &[
            ("Undergraduate", "本科"),
            ("Master", "硕士"),
            ("Language", "语言"),
        ],
    }
}

/// Sample entries with ids from 1 and dense positions
pub fn demo_entries<P: CollectionPayload>() -> Vec<Entry<P>> {
    demo_titles(P::KIND)
        .iter()
        .enumerate()
        .map(|(index, (en, zh))| {
            Entry::new(
                index as u32 + 1,
                index as u32,
                P::from_title(LocalizedText::new(*en, *zh)),
            )
        })
        .collect()
}

#[async_trait]
impl<T: Orderable + 'static> OrderStore<T> for LocalStore<T> {
    async fn load(&self) -> Result<Vec<T>, String> {
        self.round_trip().await?;
        Ok(self.items.lock().await.clone())
    }

    async fn save_order(&self, order: &[OrderEntry<T::Id>]) -> Result<(), String> {
        self.round_trip().await?;

        let positions: HashMap<T::Id, u32> =
            order.iter().map(|entry| (entry.id, entry.position)).collect();
        let mut items = self.items.lock().await;
        if let Some(unknown) = order
            .iter()
            .find(|entry| !items.iter().any(|item| item.id() == entry.id))
        {
            return Err(format!("Unknown item {:?}", unknown.id));
        }

        for item in items.iter_mut() {
            if let Some(&position) = positions.get(&item.id()) {
                item.set_position(position);
            }
        }
        items.sort_by_key(|item| item.position());

        *self.last_payload.lock().await = Some(order.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        log::debug!("Mock store saved {} positions", order.len());
        Ok(())
    }
}
