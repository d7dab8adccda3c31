use chrono::Utc;
use contracts::domain::a002_sport::aggregate::{Sport, SportId};
use contracts::enums::SportSort;
use contracts::shared::Pagination;
use uuid::Uuid;

use crate::shared::data::error::DataError;
use crate::shared::data::store::{
    FieldMap, FieldValue, Filter, Record, RecordKind, RecordStore, SelectOptions, SortDir,
};

pub fn to_sport(record: &Record) -> Result<Sport, DataError> {
    Ok(Sport {
        id: SportId::new(record.uuid("id")?),
        title: record.text("title")?.to_string(),
        price: record.integer("price")?,
        description: record.text("description")?.to_string(),
        duration: record.text("duration")?.to_string(),
        city: record.text("city")?.to_string(),
        location: record.text("location")?.to_string(),
        status: record.flag("status")?,
        sport_type_id: record.uuid("sport_type_id")?,
        metadata: record.metadata()?,
    })
}

fn sort_order(sort: SportSort) -> (&'static str, SortDir) {
    match sort {
        SportSort::LowestPrice => ("price", SortDir::Asc),
        SportSort::HighestPrice => ("price", SortDir::Desc),
        SportSort::Az => ("title", SortDir::Asc),
        SportSort::Za => ("title", SortDir::Desc),
    }
}

/// Filters applied by the sport listing. The type filter is a pre-resolved
/// id set (see `service::find_all`); `Some(vec![])` means the type search
/// matched nothing and the listing is empty.
#[derive(Debug, Clone, Default)]
pub struct SportListFilter {
    pub search: Option<String>,
    pub type_ids: Option<Vec<Uuid>>,
    pub status: Option<bool>,
}

fn build_filter(list_filter: &SportListFilter) -> Filter {
    let mut filter = Filter::new();
    if let Some(search) = &list_filter.search {
        let pattern = format!("%{}%", search);
        filter = filter.any_like(&["title", "city", "location"], &pattern);
    }
    if let Some(type_ids) = &list_filter.type_ids {
        filter = filter.is_in(
            "sport_type_id",
            type_ids.iter().map(|id| FieldValue::uuid(*id)).collect(),
        );
    }
    if let Some(status) = list_filter.status {
        filter = filter.eq("status", status);
    }
    filter
}

pub async fn list(
    store: &dyn RecordStore,
    pagination: Pagination,
    sort: SportSort,
    list_filter: &SportListFilter,
) -> Result<(Vec<Sport>, u64), DataError> {
    let (field, dir) = sort_order(sort);
    let options = SelectOptions::new()
        .order_by(field, dir)
        .limit(pagination.limit)
        .offset(pagination.offset());

    let records = store
        .find_many(RecordKind::Sport, build_filter(list_filter), options)
        .await?;
    let total = store
        .count(RecordKind::Sport, build_filter(list_filter))
        .await?;

    let items = records
        .iter()
        .map(to_sport)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((items, total))
}

pub async fn get_by_id(store: &dyn RecordStore, id: Uuid) -> Result<Sport, DataError> {
    let record = store
        .find_one(RecordKind::Sport, Filter::new().eq("id", FieldValue::uuid(id)))
        .await?
        .ok_or(DataError::NotFound)?;
    to_sport(&record)
}

pub async fn insert(store: &dyn RecordStore, aggregate: &Sport) -> Result<(), DataError> {
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
    row.insert("city".into(), FieldValue::Text(aggregate.city.clone()));
    row.insert(
        "location".into(),
        FieldValue::Text(aggregate.location.clone()),
    );
    row.insert("status".into(), FieldValue::Bool(aggregate.status));
    row.insert(
        "sport_type_id".into(),
        FieldValue::uuid(aggregate.sport_type_id),
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
    store.insert(RecordKind::Sport, vec![row]).await?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn update_fields(
    store: &dyn RecordStore,
    id: Uuid,
    title: &str,
    price: i64,
    description: &str,
    duration: &str,
    city: &str,
    location: &str,
    status: bool,
    sport_type_id: Uuid,
) -> Result<u64, DataError> {
    let mut payload = FieldMap::new();
    payload.insert("title".into(), FieldValue::Text(title.to_string()));
    payload.insert("price".into(), FieldValue::Integer(price));
    payload.insert(
        "description".into(),
        FieldValue::Text(description.to_string()),
    );
    payload.insert("duration".into(), FieldValue::Text(duration.to_string()));
    payload.insert("city".into(), FieldValue::Text(city.to_string()));
    payload.insert("location".into(), FieldValue::Text(location.to_string()));
    payload.insert("status".into(), FieldValue::Bool(status));
    payload.insert("sport_type_id".into(), FieldValue::uuid(sport_type_id));
    payload.insert("updated_at".into(), FieldValue::timestamp(Utc::now()));
    store
        .update_one(
            RecordKind::Sport,
            Filter::new().eq("id", FieldValue::uuid(id)),
            payload,
        )
        .await
}

pub async fn set_status(
    store: &dyn RecordStore,
    id: Uuid,
    status: bool,
) -> Result<u64, DataError> {
    let mut payload = FieldMap::new();
    payload.insert("status".into(), FieldValue::Bool(status));
    payload.insert("updated_at".into(), FieldValue::timestamp(Utc::now()));
    store
        .update_one(
            RecordKind::Sport,
            Filter::new().eq("id", FieldValue::uuid(id)),
            payload,
        )
        .await
}

pub async fn soft_delete(store: &dyn RecordStore, id: Uuid) -> Result<u64, DataError> {
    store
        .delete_one(RecordKind::Sport, Filter::new().eq("id", FieldValue::uuid(id)))
        .await
}

pub async fn soft_delete_images(store: &dyn RecordStore, id: Uuid) -> Result<u64, DataError> {
    store
        .delete_many(
            RecordKind::Image,
            Filter::new().eq("sport_id", FieldValue::uuid(id)),
        )
        .await
}

pub async fn images_of(store: &dyn RecordStore, id: Uuid) -> Result<Vec<Record>, DataError> {
    store
        .find_many(
            RecordKind::Image,
            Filter::new().eq("sport_id", FieldValue::uuid(id)),
            SelectOptions::new(),
        )
        .await
}

pub async fn itineraries_of(store: &dyn RecordStore, id: Uuid) -> Result<Vec<Record>, DataError> {
    store
        .find_many(
            RecordKind::Itinerary,
            Filter::new().eq("sport_id", FieldValue::uuid(id)),
            SelectOptions::new().order_by("day", SortDir::Asc),
        )
        .await
}
