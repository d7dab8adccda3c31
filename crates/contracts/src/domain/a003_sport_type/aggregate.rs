use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, EntityMetadata};

/// Unique identifier of a sport type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SportTypeId(pub Uuid);

impl SportTypeId {
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

impl AggregateId for SportTypeId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SportTypeId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Category of sport activities; names are unique among live records
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportType {
    pub id: SportTypeId,
    pub name: String,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl SportType {
    pub fn new_for_insert(name: String) -> Self {
        Self {
            id: SportTypeId::new_v4(),
            name,
            metadata: EntityMetadata::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SportTypeDraft {
    pub name: String,
}
