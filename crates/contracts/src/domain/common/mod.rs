//! Common types shared by all aggregates

pub mod aggregate_id;
pub mod child;
pub mod entity_metadata;

// Re-exports
pub use aggregate_id::AggregateId;
pub use child::{BenefitTag, ImageRef, ItineraryDraft, ItineraryEntry, Place};
pub use entity_metadata::EntityMetadata;
