//! Program Tag Payload
//!
//! Tags categorize programs on the listing page; their order is the order
//! of the filter chips.

use serde::{Deserialize, Serialize};

use super::collection::{CollectionKind, CollectionPayload};
use super::localized::{Locale, LocalizedText};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramTag {
    /// Tag name
    pub name: LocalizedText,
    /// Color (hex, e.g., "#FF5733")
    pub color: Option<String>,
}

impl ProgramTag {
    pub fn new(name: LocalizedText) -> Self {
        Self { name, color: None }
    }

    pub fn with_color(name: LocalizedText, color: String) -> Self {
        Self {
            name,
            color: Some(color),
        }
    }
}

impl CollectionPayload for ProgramTag {
    const KIND: CollectionKind = CollectionKind::ProgramTags;

    fn label(&self, locale: Locale) -> String {
        self.name.get(locale).to_string()
    }

    fn from_title(title: LocalizedText) -> Self {
        Self::new(title)
    }
}
