use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{
    AggregateId, BenefitTag, EntityMetadata, ImageRef, ItineraryDraft, ItineraryEntry, Place,
};

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a holiday package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolidayId(pub Uuid);

impl HolidayId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for HolidayId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(HolidayId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A holiday package: the parent record of the places / benefits / images /
/// itinerary child collections
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: HolidayId,
    pub title: String,
    /// Price in whole currency units
    pub price: i64,
    pub description: String,
    /// Display text such as "3D2N"
    pub duration: String,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Holiday {
    /// Build a new package ready for insertion
    pub fn new_for_insert(title: String, price: i64, description: String, duration: String) -> Self {
        Self {
            id: HolidayId::new_v4(),
            title,
            price,
            description,
            duration,
            metadata: EntityMetadata::new(),
        }
    }
}

// ============================================================================
// Input / output shapes
// ============================================================================

/// Caller-supplied state for create and update. The child vectors are the
/// complete desired sets, not deltas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayDraft {
    pub title: String,
    pub price: i64,
    pub description: String,
    pub duration: String,
    pub places: Vec<String>,
    pub benefits: Vec<String>,
    pub images: Vec<String>,
    pub itineraries: Vec<ItineraryDraft>,
}

/// Detail view: the package, its live children and peer recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayDetail {
    #[serde(flatten)]
    pub holiday: Holiday,
    pub places: Vec<Place>,
    pub benefits: Vec<BenefitTag>,
    pub images: Vec<ImageRef>,
    pub itineraries: Vec<ItineraryEntry>,
    pub recommendations: Vec<Holiday>,
}
