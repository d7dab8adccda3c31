use chrono::Utc;
use contracts::domain::a003_sport_type::aggregate::{SportType, SportTypeId};
use uuid::Uuid;

use crate::shared::data::error::DataError;
use crate::shared::data::store::{
    FieldMap, FieldValue, Filter, Record, RecordKind, RecordStore, SelectOptions, SortDir,
};

pub fn to_sport_type(record: &Record) -> Result<SportType, DataError> {
    Ok(SportType {
        id: SportTypeId::new(record.uuid("id")?),
        name: record.text("name")?.to_string(),
        metadata: record.metadata()?,
    })
}

pub async fn list_all(store: &dyn RecordStore) -> Result<Vec<SportType>, DataError> {
    let records = store
        .find_many(
            RecordKind::SportType,
            Filter::new(),
            SelectOptions::new().order_by("name", SortDir::Asc),
        )
        .await?;
    records.iter().map(to_sport_type).collect()
}

pub async fn get_by_id(store: &dyn RecordStore, id: Uuid) -> Result<SportType, DataError> {
    let record = store
        .find_one(
            RecordKind::SportType,
            Filter::new().eq("id", FieldValue::uuid(id)),
        )
        .await?
        .ok_or(DataError::NotFound)?;
    to_sport_type(&record)
}

pub async fn find_by_id(store: &dyn RecordStore, id: Uuid) -> Result<Option<SportType>, DataError> {
    let record = store
        .find_one(
            RecordKind::SportType,
            Filter::new().eq("id", FieldValue::uuid(id)),
        )
        .await?;
    record.as_ref().map(to_sport_type).transpose()
}

/// Live type whose name equals `name` exactly, excluding `except` if given.
/// Backs the uniqueness check on create and update.
pub async fn find_by_name(
    store: &dyn RecordStore,
    name: &str,
    except: Option<Uuid>,
) -> Result<Option<SportType>, DataError> {
    let mut filter = Filter::new().eq("name", name);
    if let Some(id) = except {
        filter = filter.ne("id", FieldValue::uuid(id));
    }
    let record = store.find_one(RecordKind::SportType, filter).await?;
    record.as_ref().map(to_sport_type).transpose()
}

/// Ids of live types whose name matches the pattern, for the sport listing's
/// type-name filter
pub async fn ids_by_name_like(
    store: &dyn RecordStore,
    name: &str,
) -> Result<Vec<Uuid>, DataError> {
    let pattern = format!("%{}%", name);
    let records = store
        .find_many(
            RecordKind::SportType,
            Filter::new().like("name", &pattern),
            SelectOptions::new(),
        )
        .await?;
    records.iter().map(|r| r.uuid("id")).collect()
}

pub async fn insert(store: &dyn RecordStore, aggregate: &SportType) -> Result<(), DataError> {
    let mut row = FieldMap::new();
    row.insert("id".into(), FieldValue::uuid(aggregate.id.value()));
    row.insert("name".into(), FieldValue::Text(aggregate.name.clone()));
    row.insert(
        "created_at".into(),
        FieldValue::timestamp(aggregate.metadata.created_at),
    );
    row.insert(
        "updated_at".into(),
        FieldValue::timestamp(aggregate.metadata.updated_at),
    );
    row.insert("is_deleted".into(), FieldValue::Bool(false));
    row.insert("deleted_at".into(), FieldValue::Null);
    store.insert(RecordKind::SportType, vec![row]).await?;
    Ok(())
}

pub async fn update_name(store: &dyn RecordStore, id: Uuid, name: &str) -> Result<u64, DataError> {
    let mut payload = FieldMap::new();
    payload.insert("name".into(), FieldValue::Text(name.to_string()));
    payload.insert("updated_at".into(), FieldValue::timestamp(Utc::now()));
    store
        .update_one(
            RecordKind::SportType,
            Filter::new().eq("id", FieldValue::uuid(id)),
            payload,
        )
        .await
}

pub async fn soft_delete(store: &dyn RecordStore, id: Uuid) -> Result<u64, DataError> {
    store
        .delete_one(
            RecordKind::SportType,
            Filter::new().eq("id", FieldValue::uuid(id)),
        )
        .await
}
