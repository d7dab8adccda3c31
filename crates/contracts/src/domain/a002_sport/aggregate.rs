use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a003_sport_type::SportType;
use crate::domain::common::{
    AggregateId, EntityMetadata, ImageRef, ItineraryDraft, ItineraryEntry,
};

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a sport activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SportId(pub Uuid);

impl SportId {
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

impl AggregateId for SportId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SportId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A bookable sport activity, categorized by a sport type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sport {
    pub id: SportId,
    pub title: String,
    pub price: i64,
    pub description: String,
    pub duration: String,
    pub city: String,
    pub location: String,
    /// Inactive activities stay stored but are filterable out of listings
    pub status: bool,
    pub sport_type_id: Uuid,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Sport {
    pub fn new_for_insert(draft: &SportDraft) -> Self {
        Self {
            id: SportId::new_v4(),
            title: draft.title.clone(),
            price: draft.price,
            description: draft.description.clone(),
            duration: draft.duration.clone(),
            city: draft.city.clone(),
            location: draft.location.clone(),
            status: draft.status,
            sport_type_id: draft.sport_type_id,
            metadata: EntityMetadata::new(),
        }
    }
}

// ============================================================================
// Input / output shapes
// ============================================================================

/// Caller-supplied state for create and update; child vectors are complete
/// desired sets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportDraft {
    pub title: String,
    pub price: i64,
    pub description: String,
    pub duration: String,
    pub city: String,
    pub location: String,
    #[serde(default = "default_status")]
    pub status: bool,
    pub sport_type_id: Uuid,
    pub images: Vec<String>,
    pub itineraries: Vec<ItineraryDraft>,
}

fn default_status() -> bool {
    true
}

/// Detail view with live children, the resolved category and peer
/// recommendations (same sport type)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportDetail {
    #[serde(flatten)]
    pub sport: Sport,
    pub sport_type: Option<SportType>,
    pub images: Vec<ImageRef>,
    pub itineraries: Vec<ItineraryEntry>,
    pub recommendations: Vec<Sport>,
}
