use contracts::domain::a001_holiday::aggregate::{Holiday, HolidayDetail, HolidayDraft};
use contracts::enums::HolidaySort;
use contracts::shared::{Paged, Pagination};
use uuid::Uuid;

use super::repository;
use crate::domain::children;
use crate::shared::config::RecommendationWindow;
use crate::shared::data::error::DataError;
use crate::shared::data::recommend::{find_peers, RecommendationSpec};
use crate::shared::data::reconcile::reconcile;
use crate::shared::data::store::{RecordKind, RecordStore};

/// Insert the package and converge all four child collections
pub async fn create(store: &dyn RecordStore, draft: HolidayDraft) -> Result<Holiday, DataError> {
    let aggregate = Holiday::new_for_insert(
        draft.title.clone(),
        draft.price,
        draft.description.clone(),
        draft.duration.clone(),
    );
    repository::insert(store, &aggregate).await?;

    let id = aggregate.id.value();
    reconcile(store, id, &children::places(), &[], &draft.places).await?;
    reconcile(store, id, &children::benefits(), &[], &draft.benefits).await?;
    reconcile(store, id, &children::images("holiday_id"), &[], &draft.images).await?;
    reconcile(
        store,
        id,
        &children::itineraries("holiday_id"),
        &[],
        &draft.itineraries,
    )
    .await?;

    Ok(aggregate)
}

pub async fn find_all(
    store: &dyn RecordStore,
    pagination: Pagination,
    sort: HolidaySort,
) -> Result<Paged<Holiday>, DataError> {
    let (items, total) = repository::list(store, pagination, sort).await?;
    Ok(Paged::new(items, pagination, total))
}

/// Detail view: the package, its live children, and price-window peers
pub async fn find_one(
    store: &dyn RecordStore,
    id: Uuid,
    window: RecommendationWindow,
) -> Result<HolidayDetail, DataError> {
    let holiday = repository::get_by_id(store, id).await?;

    let places = repository::places_of(store, id)
        .await?
        .iter()
        .map(children::to_place)
        .collect::<Result<Vec<_>, _>>()?;
    let benefits = repository::benefits_of(store, id)
        .await?
        .iter()
        .map(children::to_benefit)
        .collect::<Result<Vec<_>, _>>()?;
    let images = repository::images_of(store, id)
        .await?
        .iter()
        .map(children::to_image)
        .collect::<Result<Vec<_>, _>>()?;
    let itineraries = repository::itineraries_of(store, id)
        .await?
        .iter()
        .map(children::to_itinerary)
        .collect::<Result<Vec<_>, _>>()?;

    let spec = RecommendationSpec {
        reference_id: id,
        price: holiday.price,
        low: window.low,
        high: window.high,
        same_category: None,
        limit: window.limit,
    };
    let recommendations = find_peers(store, RecordKind::Holiday, &spec)
        .await?
        .iter()
        .map(repository::to_holiday)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HolidayDetail {
        holiday,
        places,
        benefits,
        images,
        itineraries,
        recommendations,
    })
}

/// Replace the parent fields and converge every child collection to the
/// draft's desired sets
pub async fn update(
    store: &dyn RecordStore,
    id: Uuid,
    draft: HolidayDraft,
) -> Result<Holiday, DataError> {
    // Existence check before any write
    repository::get_by_id(store, id).await?;

    repository::update_fields(
        store,
        id,
        &draft.title,
        draft.price,
        &draft.description,
        &draft.duration,
    )
    .await?;

    let current = repository::places_of(store, id).await?;
    reconcile(store, id, &children::places(), &current, &draft.places).await?;

    let current = repository::benefits_of(store, id).await?;
    reconcile(store, id, &children::benefits(), &current, &draft.benefits).await?;

    let current = repository::images_of(store, id).await?;
    reconcile(
        store,
        id,
        &children::images("holiday_id"),
        &current,
        &draft.images,
    )
    .await?;

    let current = repository::itineraries_of(store, id).await?;
    reconcile(
        store,
        id,
        &children::itineraries("holiday_id"),
        &current,
        &draft.itineraries,
    )
    .await?;

    repository::get_by_id(store, id).await
}

pub async fn remove(store: &dyn RecordStore, id: Uuid) -> Result<(), DataError> {
    repository::get_by_id(store, id).await?;
    repository::soft_delete(store, id).await?;
    Ok(())
}
