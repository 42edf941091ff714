//! Quick Link Payload
//!
//! Shortcut links in the site header and footer.

use serde::{Deserialize, Serialize};

use super::collection::{CollectionKind, CollectionPayload};
use super::localized::{Locale, LocalizedText};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickLink {
    pub label: LocalizedText,
    pub url: String,
    #[serde(default)]
    pub open_in_new_tab: bool,
}

impl QuickLink {
    pub fn new(label: LocalizedText, url: impl Into<String>) -> Self {
        Self {
            label,
            url: url.into(),
            open_in_new_tab: false,
        }
    }

    /// Whether the link leaves the site
    pub fn is_external(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }
}

impl CollectionPayload for QuickLink {
    const KIND: CollectionKind = CollectionKind::QuickLinks;

    fn label(&self, locale: Locale) -> String {
        self.label.get(locale).to_string()
    }

    fn from_title(title: LocalizedText) -> Self {
        Self::new(title, "#")
    }
}
