//! Collection Entries
//!
//! Every admin list (hero slides, featured programs, ...) stores `Entry<P>`:
//! the orderable envelope around a collection-specific payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, Entity, Orderable};
use super::localized::{Locale, LocalizedText};

/// Which admin list an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    HeroSlides,
    FeaturedPrograms,
    StudentStories,
    QuickLinks,
    ProgramTags,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 5] = [
        CollectionKind::HeroSlides,
        CollectionKind::FeaturedPrograms,
        CollectionKind::StudentStories,
        CollectionKind::QuickLinks,
        CollectionKind::ProgramTags,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::HeroSlides => "hero_slides",
            CollectionKind::FeaturedPrograms => "featured_programs",
            CollectionKind::StudentStories => "student_stories",
            CollectionKind::QuickLinks => "quick_links",
            CollectionKind::ProgramTags => "program_tags",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CollectionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the kebab-case spelling used on the command line as well
        let normalized = s.trim().replace('-', "_");
        CollectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| DomainError::InvalidInput(format!("Unknown collection: {}", s)))
    }
}

/// Payload stored inside an `Entry`, tied to exactly one collection
pub trait CollectionPayload: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: CollectionKind;

    /// Short text identifying the entry in admin lists
    fn label(&self, locale: Locale) -> String;

    /// Minimal payload with only its title filled in
    fn from_title(title: LocalizedText) -> Self;
}

/// An orderable record of a collection
///
/// Serialized flat: `{"id": 1, "position": 0, "title": {...}, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<P> {
    /// Unique identifier (0 until persisted)
    pub id: u32,
    /// 0-based display position
    pub position: u32,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> Entry<P> {
    pub fn new(id: u32, position: u32, payload: P) -> Self {
        Self { id, position, payload }
    }

    /// A not yet persisted entry; the repository assigns id and position
    pub fn draft(payload: P) -> Self {
        Self::new(0, 0, payload)
    }
}

impl<P: Clone + Send + Sync> Entity for Entry<P> {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl<P: Clone + Send + Sync> Orderable for Entry<P> {
    fn position(&self) -> u32 {
        self.position
    }

    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}
