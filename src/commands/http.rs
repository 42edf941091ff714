//! Remote order API client
//!
//! `GET {base}/{collection}` lists entries, `PUT {base}/{collection}/order`
//! takes the `[{id, position}]` batch.

use async_trait::async_trait;
use std::marker::PhantomData;
use std::time::Duration;

use super::OrderStore;
use crate::models::{CollectionPayload, Entry, OrderEntry};

pub struct HttpStore<P> {
    client: reqwest::Client,
    base_url: String,
    _payload: PhantomData<fn() -> P>,
}

impl<P: CollectionPayload> HttpStore<P> {
    pub fn new(base_url: &str) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| e.to_string())?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            _payload: PhantomData,
        })
    }

    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, P::KIND)
    }

    pub fn order_url(&self) -> String {
        format!("{}/order", self.collection_url())
    }
}

#[async_trait]
impl<P: CollectionPayload> OrderStore<Entry<P>> for HttpStore<P> {
    async fn load(&self) -> Result<Vec<Entry<P>>, String> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| format!("Failed to load {}: {}", P::KIND, e))?;
        response
            .json::<Vec<Entry<P>>>()
            .await
            .map_err(|e| format!("Invalid {} response: {}", P::KIND, e))
    }

    async fn save_order(&self, order: &[OrderEntry]) -> Result<(), String> {
        self.client
            .put(self.order_url())
            .json(order)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| format!("Failed to save {} order: {}", P::KIND, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HeroSlide;

    #[test]
    fn test_urls() {
        let store = HttpStore::<HeroSlide>::new("https://admin.example.com/api/").unwrap();
        assert_eq!(store.collection_url(), "https://admin.example.com/api/hero_slides");
        assert_eq!(store.order_url(), "https://admin.example.com/api/hero_slides/order");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        let store = HttpStore::<HeroSlide>::new("http://127.0.0.1:9").unwrap();
        let err = store.save_order(&[OrderEntry::new(1, 0)]).await.unwrap_err();
        assert!(err.starts_with("Failed to save hero_slides order"), "{}", err);
    }
}
