//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage dependencies beyond error conversions.

mod entity;
mod collection;
mod localized;
mod hero_slide;
mod program;
mod story;
mod quick_link;
mod tag;

pub use entity::{Entity, Orderable, OrderEntry, DomainError, DomainResult};
pub use collection::{CollectionKind, CollectionPayload, Entry};
pub use localized::{Locale, LocalizedText};
pub use hero_slide::HeroSlide;
pub use program::FeaturedProgram;
pub use story::StudentStory;
pub use quick_link::QuickLink;
pub use tag::ProgramTag;
