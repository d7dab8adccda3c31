//! Soft-delete decorator over any [`RecordStore`].
//!
//! Every call site goes through this wrapper, so logically deleted records
//! stay invisible without per-query `is_deleted` clauses:
//!
//! - single-record reads and updates always force `is_deleted = false`;
//!   a caller cannot see, revive or edit a deleted record through them;
//! - bulk reads and counts add the clause only when the caller was silent,
//!   so an explicit `is_deleted = true` filter remains the escape hatch for
//!   inspecting deleted rows;
//! - deletes never reach the backing store as deletes: they become updates
//!   that set the marker and the deletion timestamp. Rows already marked
//!   are not touched again, so a repeated delete keeps the original
//!   `deleted_at`.

use async_trait::async_trait;
use chrono::Utc;

use super::error::DataError;
use super::store::{
    Condition, FieldMap, FieldValue, Filter, Record, RecordKind, RecordStore, SelectOptions,
    DELETED_AT, DELETED_FLAG,
};

pub struct SoftDeleteStore<S> {
    inner: S,
}

impl<S: RecordStore> SoftDeleteStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

fn live_only() -> Condition {
    Condition::Eq(FieldValue::Bool(false))
}

/// Payload substituted for every delete
fn deletion_payload() -> FieldMap {
    let mut payload = FieldMap::new();
    payload.insert(DELETED_FLAG.into(), FieldValue::Bool(true));
    payload.insert(DELETED_AT.into(), FieldValue::timestamp(Utc::now()));
    payload
}

#[async_trait]
impl<S: RecordStore> RecordStore for SoftDeleteStore<S> {
    async fn find_one(&self, kind: RecordKind, filter: Filter) -> Result<Option<Record>, DataError> {
        let mut filter = filter;
        filter.set(DELETED_FLAG, live_only());
        self.inner.find_one(kind, filter).await
    }

    async fn find_many(
        &self,
        kind: RecordKind,
        filter: Filter,
        options: SelectOptions,
    ) -> Result<Vec<Record>, DataError> {
        let mut filter = filter;
        filter.set_if_absent(DELETED_FLAG, live_only());
        self.inner.find_many(kind, filter, options).await
    }

    async fn count(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError> {
        let mut filter = filter;
        filter.set_if_absent(DELETED_FLAG, live_only());
        self.inner.count(kind, filter).await
    }

    async fn insert(&self, kind: RecordKind, rows: Vec<FieldMap>) -> Result<u64, DataError> {
        self.inner.insert(kind, rows).await
    }

    async fn update_one(
        &self,
        kind: RecordKind,
        filter: Filter,
        payload: FieldMap,
    ) -> Result<u64, DataError> {
        // Rewritten to a filtered bulk update; the forced marker clause keeps
        // deleted records out of reach even when the id matches.
        let mut filter = filter;
        filter.set(DELETED_FLAG, live_only());
        self.inner.update_many(kind, filter, payload).await
    }

    async fn update_many(
        &self,
        kind: RecordKind,
        filter: Filter,
        payload: FieldMap,
    ) -> Result<u64, DataError> {
        let mut filter = filter;
        filter.set_if_absent(DELETED_FLAG, live_only());
        self.inner.update_many(kind, filter, payload).await
    }

    async fn delete_one(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError> {
        let mut filter = filter;
        filter.set(DELETED_FLAG, live_only());
        self.inner
            .update_one(kind, filter, deletion_payload())
            .await
    }

    async fn delete_many(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError> {
        let mut filter = filter;
        filter.set(DELETED_FLAG, live_only());
        self.inner
            .update_many(kind, filter, deletion_payload())
            .await
    }
}
