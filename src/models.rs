//! Console Models
//!
//! Data structures shared with the backend.

pub use site_admin_backend::domain::{
    CollectionKind, CollectionPayload, Entity, Entry, FeaturedProgram, HeroSlide, Locale,
    LocalizedText, OrderEntry, Orderable, ProgramTag, QuickLink, StudentStory,
};
