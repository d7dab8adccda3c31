use serde::{Deserialize, Serialize};

/// Lifecycle metadata carried by every persisted record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Soft-delete marker; deleted records stay invisible to ordinary reads
    pub is_deleted: bool,
    /// Set once when the record is soft-deleted, never cleared
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl EntityMetadata {
    /// Fresh metadata for a record about to be inserted
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            is_deleted: false,
            deleted_at: None,
        }
    }

    /// Bump the update timestamp
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }

    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.deleted_at = Some(chrono::Utc::now());
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}
