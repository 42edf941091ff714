//! Hero Slide Payload
//!
//! Rotating banner on the home page.

use serde::{Deserialize, Serialize};

use super::collection::{CollectionKind, CollectionPayload};
use super::localized::{Locale, LocalizedText};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSlide {
    pub title: LocalizedText,
    #[serde(default)]
    pub subtitle: LocalizedText,
    pub image_url: String,
    /// Call-to-action target
    pub link_url: Option<String>,
    /// Hidden slides stay in the list but are skipped by the carousel
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl HeroSlide {
    pub fn new(title: LocalizedText, image_url: impl Into<String>) -> Self {
        Self {
            title,
            subtitle: LocalizedText::default(),
            image_url: image_url.into(),
            link_url: None,
            active: true,
        }
    }
}

impl CollectionPayload for HeroSlide {
    const KIND: CollectionKind = CollectionKind::HeroSlides;

    fn label(&self, locale: Locale) -> String {
        self.title.get(locale).to_string()
    }

    fn from_title(title: LocalizedText) -> Self {
        Self::new(title, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_slide_defaults() {
        let slide: HeroSlide = serde_json::from_str(
            r#"{"title":{"en":"Study abroad"},"image_url":"/img/1.jpg","link_url":null}"#,
        )
        .unwrap();
        assert!(slide.active);
        assert_eq!(slide.subtitle, LocalizedText::default());
    }
}
