use chrono::Utc;
use contracts::domain::a001_holiday::aggregate::{Holiday, HolidayId};
use contracts::enums::HolidaySort;
use contracts::shared::Pagination;
use uuid::Uuid;

use crate::shared::data::error::DataError;
use crate::shared::data::store::{
    FieldMap, FieldValue, Filter, Record, RecordKind, RecordStore, SelectOptions, SortDir,
};

pub fn to_holiday(record: &Record) -> Result<Holiday, DataError> {
    Ok(Holiday {
        id: HolidayId::new(record.uuid("id")?),
        title: record.text("title")?.to_string(),
        price: record.integer("price")?,
        description: record.text("description")?.to_string(),
        duration: record.text("duration")?.to_string(),
        metadata: record.metadata()?,
    })
}

fn sort_order(sort: HolidaySort) -> (&'static str, SortDir) {
    match sort {
        HolidaySort::LowestPrice => ("price", SortDir::Asc),
        HolidaySort::HighestPrice => ("price", SortDir::Desc),
        HolidaySort::Az => ("title", SortDir::Asc),
        HolidaySort::Za => ("title", SortDir::Desc),
    }
}

pub async fn list(
    store: &dyn RecordStore,
    pagination: Pagination,
    sort: HolidaySort,
) -> Result<(Vec<Holiday>, u64), DataError> {
    let (field, dir) = sort_order(sort);
    let options = SelectOptions::new()
        .order_by(field, dir)
        .limit(pagination.limit)
        .offset(pagination.offset());

    let records = store
        .find_many(RecordKind::Holiday, Filter::new(), options)
        .await?;
    let total = store.count(RecordKind::Holiday, Filter::new()).await?;

    let items = records
        .iter()
        .map(to_holiday)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((items, total))
}

pub async fn get_by_id(store: &dyn RecordStore, id: Uuid) -> Result<Holiday, DataError> {
    let record = store
        .find_one(RecordKind::Holiday, Filter::new().eq("id", FieldValue::uuid(id)))
        .await?
        .ok_or(DataError::NotFound)?;
    to_holiday(&record)
}

pub async fn insert(store: &dyn RecordStore, aggregate: &Holiday) -> Result<(), DataError> {
    let mut row = FieldMap::new();
    row.insert("id".into(), FieldValue::uuid(aggregate.id.value()));
    row.insert("title".into(), FieldValue::Text(aggregate.title.clone()));
    row.insert("price".into(), FieldValue::Integer(aggregate.price));
    row.insert(
        "description".into(),
        FieldValue::Text(aggregate.description.clone()),
    );
    row.insert(
        "duration".into(),
        FieldValue::Text(aggregate.duration.clone()),
    );
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
    store.insert(RecordKind::Holiday, vec![row]).await?;
    Ok(())
}

/// Update the parent fields only; child collections are reconciled separately
pub async fn update_fields(
    store: &dyn RecordStore,
    id: Uuid,
    title: &str,
    price: i64,
    description: &str,
    duration: &str,
) -> Result<u64, DataError> {
    let mut payload = FieldMap::new();
    payload.insert("title".into(), FieldValue::Text(title.to_string()));
    payload.insert("price".into(), FieldValue::Integer(price));
    payload.insert(
        "description".into(),
        FieldValue::Text(description.to_string()),
    );
    payload.insert("duration".into(), FieldValue::Text(duration.to_string()));
    payload.insert("updated_at".into(), FieldValue::timestamp(Utc::now()));
    store
        .update_one(
            RecordKind::Holiday,
            Filter::new().eq("id", FieldValue::uuid(id)),
            payload,
        )
        .await
}

pub async fn soft_delete(store: &dyn RecordStore, id: Uuid) -> Result<u64, DataError> {
    store
        .delete_one(RecordKind::Holiday, Filter::new().eq("id", FieldValue::uuid(id)))
        .await
}

async fn children_of(
    store: &dyn RecordStore,
    kind: RecordKind,
    holiday_id: Uuid,
    options: SelectOptions,
) -> Result<Vec<Record>, DataError> {
    store
        .find_many(
            kind,
            Filter::new().eq("holiday_id", FieldValue::uuid(holiday_id)),
            options,
        )
        .await
}

pub async fn places_of(store: &dyn RecordStore, id: Uuid) -> Result<Vec<Record>, DataError> {
    children_of(store, RecordKind::Place, id, SelectOptions::new()).await
}

pub async fn benefits_of(store: &dyn RecordStore, id: Uuid) -> Result<Vec<Record>, DataError> {
    children_of(store, RecordKind::Benefit, id, SelectOptions::new()).await
}

pub async fn images_of(store: &dyn RecordStore, id: Uuid) -> Result<Vec<Record>, DataError> {
    children_of(store, RecordKind::Image, id, SelectOptions::new()).await
}

pub async fn itineraries_of(store: &dyn RecordStore, id: Uuid) -> Result<Vec<Record>, DataError> {
    children_of(
        store,
        RecordKind::Itinerary,
        id,
        SelectOptions::new().order_by("day", SortDir::Asc),
    )
    .await
}
