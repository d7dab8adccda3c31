//! Child-collection reconciliation.
//!
//! Converges the stored child set of one parent to a caller-supplied desired
//! set, keyed by the collection's natural key: rows whose key is missing from
//! the desired set are soft-deleted, missing keys are inserted, and keys
//! present on both sides get an update only for the fields that actually
//! differ. Children equal on both sides are never written.
//!
//! The three write batches run sequentially without a surrounding
//! transaction; concurrent reconciliations of the same collection are
//! last-write-wins per record.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use uuid::Uuid;

use super::error::DataError;
use super::store::{base_row, FieldMap, FieldValue, Filter, Record, RecordKind, RecordStore};

/// Per-collection configuration: how to key, create and diff one child kind
pub struct ChildSpec<D, K> {
    pub kind: RecordKind,
    /// Foreign-key column pointing at the parent
    pub parent_field: &'static str,
    pub key_of_desired: fn(&D) -> K,
    pub key_of_record: fn(&Record) -> Result<K, DataError>,
    /// Domain fields of a new row; id, parent FK and lifecycle fields are
    /// filled in by the reconciler
    pub insert_fields: fn(&D) -> FieldMap,
    /// Fields whose stored value differs from the desired one; empty map
    /// means the child is up to date
    pub changed_fields: fn(&Record, &D) -> Result<FieldMap, DataError>,
}

/// Keys the reconciliation actually wrote, for logging and tests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileOutcome {
    pub inserted: Vec<String>,
    pub updated: Vec<String>,
    pub removed: Vec<String>,
}

impl ReconcileOutcome {
    pub fn is_noop(&self) -> bool {
        self.inserted.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Converge the `spec` collection of `parent_id` from `current` to `desired`.
///
/// `current` must be the live children as loaded through the soft-delete
/// decorator. Duplicate natural keys in `desired` are rejected before any
/// write is issued.
pub async fn reconcile<D, K>(
    store: &dyn RecordStore,
    parent_id: Uuid,
    spec: &ChildSpec<D, K>,
    current: &[Record],
    desired: &[D],
) -> Result<ReconcileOutcome, DataError>
where
    K: Eq + Hash + Clone + Display,
{
    let mut desired_by_key: HashMap<K, &D> = HashMap::with_capacity(desired.len());
    for item in desired {
        let key = (spec.key_of_desired)(item);
        if desired_by_key.insert(key.clone(), item).is_some() {
            return Err(DataError::Conflict(format!(
                "duplicate key `{}` in desired {} set",
                key,
                spec.kind.table()
            )));
        }
    }

    let mut current_by_key: HashMap<K, &Record> = HashMap::with_capacity(current.len());
    for record in current {
        current_by_key.insert((spec.key_of_record)(record)?, record);
    }

    let mut outcome = ReconcileOutcome::default();

    // Diff in deterministic caller order
    let mut insert_rows: Vec<FieldMap> = Vec::new();
    let mut updates: Vec<(Uuid, FieldMap, K)> = Vec::new();
    for item in desired {
        let key = (spec.key_of_desired)(item);
        match current_by_key.get(&key) {
            None => {
                let mut row = base_row(Uuid::new_v4());
                row.insert(spec.parent_field.into(), FieldValue::uuid(parent_id));
                row.extend((spec.insert_fields)(item));
                insert_rows.push(row);
                outcome.inserted.push(key.to_string());
            }
            Some(record) => {
                let changed = (spec.changed_fields)(record, item)?;
                if !changed.is_empty() {
                    updates.push((record.uuid("id")?, changed, key));
                }
            }
        }
    }

    let mut remove_ids: Vec<FieldValue> = Vec::new();
    for record in current {
        let key = (spec.key_of_record)(record)?;
        if !desired_by_key.contains_key(&key) {
            remove_ids.push(FieldValue::uuid(record.uuid("id")?));
            outcome.removed.push(key.to_string());
        }
    }

    if !insert_rows.is_empty() {
        store.insert(spec.kind, insert_rows).await?;
    }

    if !remove_ids.is_empty() {
        store
            .delete_many(spec.kind, Filter::new().is_in("id", remove_ids))
            .await?;
    }

    for (id, mut payload, key) in updates {
        payload.insert(
            "updated_at".into(),
            FieldValue::timestamp(chrono::Utc::now()),
        );
        store
            .update_one(spec.kind, Filter::new().eq("id", FieldValue::uuid(id)), payload)
            .await?;
        outcome.updated.push(key.to_string());
    }

    if !outcome.is_noop() {
        tracing::debug!(
            table = spec.kind.table(),
            parent = %parent_id,
            inserted = outcome.inserted.len(),
            updated = outcome.updated.len(),
            removed = outcome.removed.len(),
            "reconciled child collection"
        );
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::children;
    use crate::shared::data::memory::MemoryStore;
    use crate::shared::data::soft_delete::SoftDeleteStore;
    use crate::shared::data::store::{SelectOptions, DELETED_FLAG};
    use contracts::domain::common::ItineraryDraft;

    /// Counts write operations passing through, reads delegate untouched
    struct CountingStore<S> {
        inner: S,
        writes: AtomicU64,
    }

    impl<S> CountingStore<S> {
        fn new(inner: S) -> Self {
            Self {
                inner,
                writes: AtomicU64::new(0),
            }
        }

        fn writes(&self) -> u64 {
            self.writes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl<S: RecordStore> RecordStore for CountingStore<S> {
        async fn find_one(
            &self,
            kind: RecordKind,
            filter: Filter,
        ) -> Result<Option<Record>, DataError> {
            self.inner.find_one(kind, filter).await
        }

        async fn find_many(
            &self,
            kind: RecordKind,
            filter: Filter,
            options: SelectOptions,
        ) -> Result<Vec<Record>, DataError> {
            self.inner.find_many(kind, filter, options).await
        }

        async fn count(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError> {
            self.inner.count(kind, filter).await
        }

        async fn insert(&self, kind: RecordKind, rows: Vec<FieldMap>) -> Result<u64, DataError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.insert(kind, rows).await
        }

        async fn update_one(
            &self,
            kind: RecordKind,
            filter: Filter,
            payload: FieldMap,
        ) -> Result<u64, DataError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.update_one(kind, filter, payload).await
        }

        async fn update_many(
            &self,
            kind: RecordKind,
            filter: Filter,
            payload: FieldMap,
        ) -> Result<u64, DataError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.update_many(kind, filter, payload).await
        }

        async fn delete_one(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.delete_one(kind, filter).await
        }

        async fn delete_many(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.delete_many(kind, filter).await
        }
    }

    async fn live_children(
        store: &dyn RecordStore,
        kind: RecordKind,
        parent_field: &str,
        parent: Uuid,
    ) -> Vec<Record> {
        store
            .find_many(
                kind,
                Filter::new().eq(parent_field, FieldValue::uuid(parent)),
                SelectOptions::new(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn inserts_removes_and_leaves_untouched() {
        let store = SoftDeleteStore::new(MemoryStore::new());
        let parent = Uuid::new_v4();
        let spec = children::places();

        let desired = vec!["Bali".to_string(), "Lombok".to_string()];
        reconcile(&store, parent, &spec, &[], &desired).await.unwrap();

        let current = live_children(&store, RecordKind::Place, "holiday_id", parent).await;
        let bali_id = current
            .iter()
            .find(|r| r.text("name").unwrap() == "Bali")
            .unwrap()
            .uuid("id")
            .unwrap();

        let desired = vec!["Bali".to_string(), "Sumatra".to_string()];
        let outcome = reconcile(&store, parent, &spec, &current, &desired)
            .await
            .unwrap();

        assert_eq!(outcome.inserted, vec!["Sumatra"]);
        assert_eq!(outcome.removed, vec!["Lombok"]);
        assert!(outcome.updated.is_empty());

        let after = live_children(&store, RecordKind::Place, "holiday_id", parent).await;
        let mut names: Vec<&str> = after.iter().map(|r| r.text("name").unwrap()).collect();
        names.sort();
        assert_eq!(names, vec!["Bali", "Sumatra"]);

        // The kept child is the same stored row, not a re-insert
        let kept = after
            .iter()
            .find(|r| r.text("name").unwrap() == "Bali")
            .unwrap();
        assert_eq!(kept.uuid("id").unwrap(), bali_id);

        // Lombok is soft-deleted, not gone
        let deleted = store
            .find_many(
                RecordKind::Place,
                Filter::new()
                    .eq("holiday_id", FieldValue::uuid(parent))
                    .eq(DELETED_FLAG, true),
                SelectOptions::new(),
            )
            .await
            .unwrap();
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0].text("name").unwrap(), "Lombok");
    }

    #[tokio::test]
    async fn updates_only_the_changed_field() {
        let store = SoftDeleteStore::new(MemoryStore::new());
        let parent = Uuid::new_v4();
        let spec = children::itineraries("holiday_id");

        let desired = vec![
            ItineraryDraft {
                day: 1,
                description: "Arrival".into(),
            },
            ItineraryDraft {
                day: 2,
                description: "Beach day".into(),
            },
        ];
        reconcile(&store, parent, &spec, &[], &desired).await.unwrap();

        let current = live_children(&store, RecordKind::Itinerary, "holiday_id", parent).await;
        let desired = vec![
            ItineraryDraft {
                day: 1,
                description: "Arrival and check-in".into(),
            },
            ItineraryDraft {
                day: 2,
                description: "Beach day".into(),
            },
        ];
        let outcome = reconcile(&store, parent, &spec, &current, &desired)
            .await
            .unwrap();

        assert_eq!(outcome.updated, vec!["1"]);
        assert!(outcome.inserted.is_empty());
        assert!(outcome.removed.is_empty());

        let after = live_children(&store, RecordKind::Itinerary, "holiday_id", parent).await;
        let day1 = after.iter().find(|r| r.integer("day").unwrap() == 1).unwrap();
        assert_eq!(day1.text("description").unwrap(), "Arrival and check-in");
    }

    #[tokio::test]
    async fn second_run_with_same_desired_state_issues_no_writes() {
        let store = CountingStore::new(SoftDeleteStore::new(MemoryStore::new()));
        let parent = Uuid::new_v4();
        let spec = children::itineraries("sport_id");

        let desired = vec![
            ItineraryDraft {
                day: 1,
                description: "Briefing".into(),
            },
            ItineraryDraft {
                day: 2,
                description: "Summit push".into(),
            },
        ];
        reconcile(&store, parent, &spec, &[], &desired).await.unwrap();
        let writes_after_first = store.writes();
        assert!(writes_after_first > 0);

        let current = live_children(&store, RecordKind::Itinerary, "sport_id", parent).await;
        let outcome = reconcile(&store, parent, &spec, &current, &desired)
            .await
            .unwrap();

        assert!(outcome.is_noop());
        assert_eq!(store.writes(), writes_after_first);
    }

    #[tokio::test]
    async fn duplicate_desired_keys_reject_before_any_write() {
        let store = CountingStore::new(SoftDeleteStore::new(MemoryStore::new()));
        let parent = Uuid::new_v4();
        let spec = children::itineraries("holiday_id");

        let desired = vec![
            ItineraryDraft {
                day: 1,
                description: "Arrival".into(),
            },
            ItineraryDraft {
                day: 1,
                description: "Departure".into(),
            },
        ];
        let err = reconcile(&store, parent, &spec, &[], &desired)
            .await
            .unwrap_err();

        assert!(matches!(err, DataError::Conflict(_)));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn images_are_keyed_by_filename() {
        let store = SoftDeleteStore::new(MemoryStore::new());
        let parent = Uuid::new_v4();
        let spec = children::images("sport_id");

        let desired = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        reconcile(&store, parent, &spec, &[], &desired).await.unwrap();

        let current = live_children(&store, RecordKind::Image, "sport_id", parent).await;
        let desired = vec!["b.jpg".to_string(), "c.jpg".to_string()];
        let outcome = reconcile(&store, parent, &spec, &current, &desired)
            .await
            .unwrap();

        assert_eq!(outcome.inserted, vec!["c.jpg"]);
        assert_eq!(outcome.removed, vec!["a.jpg"]);
    }
}
