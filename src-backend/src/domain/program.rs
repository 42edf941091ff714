//! Featured Program Payload

use serde::{Deserialize, Serialize};

use super::collection::{CollectionKind, CollectionPayload};
use super::localized::{Locale, LocalizedText};

/// A program highlighted on the landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedProgram {
    pub name: LocalizedText,
    #[serde(default)]
    pub summary: LocalizedText,
    /// URL slug of the program detail page
    pub slug: String,
    pub image_url: Option<String>,
}

impl FeaturedProgram {
    pub fn new(name: LocalizedText, slug: impl Into<String>) -> Self {
        Self {
            name,
            summary: LocalizedText::default(),
            slug: slug.into(),
            image_url: None,
        }
    }
}

impl CollectionPayload for FeaturedProgram {
    const KIND: CollectionKind = CollectionKind::FeaturedPrograms;

    fn label(&self, locale: Locale) -> String {
        self.name.get(locale).to_string()
    }

    fn from_title(title: LocalizedText) -> Self {
        let slug = title
            .en
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("-");
        Self::new(title, slug)
    }
}
