//! Child records owned by the holiday and sport aggregates.
//!
//! Each kind carries the natural key its parent collection is reconciled
//! by: place name, benefit name, image filename, itinerary day.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A place visited during a holiday package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub name: String,
}

/// A benefit tag attached to a holiday package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitTag {
    pub id: Uuid,
    pub name: String,
}

/// A stored image reference (the binary lives in external storage)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: Uuid,
    pub filename: String,
}

/// One day of an itinerary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryEntry {
    pub id: Uuid,
    pub day: i64,
    pub description: String,
}

/// Caller-supplied desired state for one itinerary day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryDraft {
    pub day: i64,
    pub description: String,
}
