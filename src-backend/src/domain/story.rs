//! Student Story Payload

use serde::{Deserialize, Serialize};

use super::collection::{CollectionKind, CollectionPayload};
use super::localized::{Locale, LocalizedText};

/// Testimonial from a former student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentStory {
    pub student_name: String,
    pub quote: LocalizedText,
    /// e.g. "MSc Finance, 2023"
    pub program: Option<String>,
    pub photo_url: Option<String>,
}

impl StudentStory {
    pub fn new(student_name: impl Into<String>, quote: LocalizedText) -> Self {
        Self {
            student_name: student_name.into(),
            quote,
            program: None,
            photo_url: None,
        }
    }
}

impl CollectionPayload for StudentStory {
    const KIND: CollectionKind = CollectionKind::StudentStories;

    fn label(&self, locale: Locale) -> String {
        match &self.program {
            Some(program) => format!("{} ({})", self.student_name, program),
            None => format!("{}: {}", self.student_name, self.quote.get(locale)),
        }
    }

    fn from_title(title: LocalizedText) -> Self {
        Self::new(title.en, LocalizedText::default())
    }
}
