use contracts::domain::a002_sport::aggregate::{Sport, SportDetail, SportDraft};
use contracts::enums::{SportSort, StatusFilter};
use contracts::shared::{Paged, Pagination};
use uuid::Uuid;

use super::repository;
use super::repository::SportListFilter;
use crate::domain::a003_sport_type::repository as sport_type_repository;
use crate::domain::children;
use crate::shared::config::RecommendationWindow;
use crate::shared::data::error::DataError;
use crate::shared::data::recommend::{find_peers, RecommendationSpec};
use crate::shared::data::reconcile::reconcile;
use crate::shared::data::store::{RecordKind, RecordStore};

/// Insert the activity and converge its images and itinerary. The referenced
/// sport type must exist and be live.
pub async fn create(store: &dyn RecordStore, draft: SportDraft) -> Result<Sport, DataError> {
    sport_type_repository::get_by_id(store, draft.sport_type_id).await?;

    let aggregate = Sport::new_for_insert(&draft);
    repository::insert(store, &aggregate).await?;

    let id = aggregate.id.value();
    reconcile(store, id, &children::images("sport_id"), &[], &draft.images).await?;
    reconcile(
        store,
        id,
        &children::itineraries("sport_id"),
        &[],
        &draft.itineraries,
    )
    .await?;

    Ok(aggregate)
}

/// Paged listing with free-text search over title/city/location, a
/// type-name filter and an active/inactive filter
pub async fn find_all(
    store: &dyn RecordStore,
    pagination: Pagination,
    sort: SportSort,
    search: Option<String>,
    sport_type: Option<String>,
    status: Option<StatusFilter>,
) -> Result<Paged<Sport>, DataError> {
    let type_ids = match sport_type {
        Some(name) => Some(sport_type_repository::ids_by_name_like(store, &name).await?),
        None => None,
    };
    let list_filter = SportListFilter {
        search,
        type_ids,
        status: status.map(|s| matches!(s, StatusFilter::Active)),
    };
    let (items, total) = repository::list(store, pagination, sort, &list_filter).await?;
    Ok(Paged::new(items, pagination, total))
}

/// Detail view: the activity, its category, live children, and same-type
/// peers within the price window
pub async fn find_one(
    store: &dyn RecordStore,
    id: Uuid,
    window: RecommendationWindow,
) -> Result<SportDetail, DataError> {
    let sport = repository::get_by_id(store, id).await?;

    let sport_type = sport_type_repository::find_by_id(store, sport.sport_type_id).await?;
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
        price: sport.price,
        low: window.low,
        high: window.high,
        same_category: Some(("sport_type_id", sport.sport_type_id)),
        limit: window.limit,
    };
    let recommendations = find_peers(store, RecordKind::Sport, &spec)
        .await?
        .iter()
        .map(repository::to_sport)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SportDetail {
        sport,
        sport_type,
        images,
        itineraries,
        recommendations,
    })
}

pub async fn update(
    store: &dyn RecordStore,
    id: Uuid,
    draft: SportDraft,
) -> Result<Sport, DataError> {
    repository::get_by_id(store, id).await?;
    sport_type_repository::get_by_id(store, draft.sport_type_id).await?;

    repository::update_fields(
        store,
        id,
        &draft.title,
        draft.price,
        &draft.description,
        &draft.duration,
        &draft.city,
        &draft.location,
        draft.status,
        draft.sport_type_id,
    )
    .await?;

    let current = repository::images_of(store, id).await?;
    reconcile(store, id, &children::images("sport_id"), &current, &draft.images).await?;

    let current = repository::itineraries_of(store, id).await?;
    reconcile(
        store,
        id,
        &children::itineraries("sport_id"),
        &current,
        &draft.itineraries,
    )
    .await?;

    repository::get_by_id(store, id).await
}

/// Flip the active flag and return the refreshed record
pub async fn toggle_status(store: &dyn RecordStore, id: Uuid) -> Result<Sport, DataError> {
    let sport = repository::get_by_id(store, id).await?;
    repository::set_status(store, id, !sport.status).await?;
    repository::get_by_id(store, id).await
}

/// Soft-delete the activity's images, then the activity itself
pub async fn remove(store: &dyn RecordStore, id: Uuid) -> Result<(), DataError> {
    repository::get_by_id(store, id).await?;
    repository::soft_delete_images(store, id).await?;
    repository::soft_delete(store, id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use contracts::domain::a003_sport_type::aggregate::SportTypeDraft;
    use contracts::domain::common::ItineraryDraft;

    use super::*;
    use crate::domain::a003_sport_type::service as sport_type_service;
    use crate::shared::data::memory::MemoryStore;
    use crate::shared::data::soft_delete::SoftDeleteStore;

    fn draft(title: &str, price: i64, sport_type_id: Uuid) -> SportDraft {
        SportDraft {
            title: title.into(),
            price,
            description: "An activity".into(),
            duration: "2H".into(),
            city: "Denpasar".into(),
            location: "Kuta Beach".into(),
            status: true,
            sport_type_id,
            images: vec!["cover.jpg".into()],
            itineraries: vec![ItineraryDraft {
                day: 1,
                description: "Briefing".into(),
            }],
        }
    }

    fn window() -> RecommendationWindow {
        RecommendationWindow {
            low: 0.5,
            high: 1.5,
            limit: 4,
        }
    }

    async fn seed_type(store: &dyn RecordStore, name: &str) -> Uuid {
        sport_type_service::create(store, SportTypeDraft { name: name.into() })
            .await
            .unwrap()
            .id
            .value()
    }

    #[tokio::test]
    async fn create_rejects_missing_sport_type() {
        let store = SoftDeleteStore::new(MemoryStore::new());
        let err = create(&store, draft("Surf lesson", 250_000, Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::NotFound));
    }

    #[tokio::test]
    async fn toggle_flips_and_persists_the_flag() {
        let store = SoftDeleteStore::new(MemoryStore::new());
        let surfing = seed_type(&store, "Surfing").await;
        let created = create(&store, draft("Surf lesson", 250_000, surfing))
            .await
            .unwrap();
        assert!(created.status);

        let toggled = toggle_status(&store, created.id.value()).await.unwrap();
        assert!(!toggled.status);

        let again = toggle_status(&store, created.id.value()).await.unwrap();
        assert!(again.status);
    }

    #[tokio::test]
    async fn listing_filters_by_search_type_and_status() {
        let store = SoftDeleteStore::new(MemoryStore::new());
        let surfing = seed_type(&store, "Surfing").await;
        let diving = seed_type(&store, "Diving").await;

        create(&store, draft("Surf lesson", 250_000, surfing))
            .await
            .unwrap();
        let wreck = create(&store, draft("Wreck dive", 400_000, diving))
            .await
            .unwrap();
        create(&store, draft("Reef dive", 300_000, diving))
            .await
            .unwrap();
        toggle_status(&store, wreck.id.value()).await.unwrap();

        let by_search = find_all(
            &store,
            Pagination::default(),
            SportSort::Az,
            Some("dive".into()),
            None,
            None,
        )
        .await
        .unwrap();
        assert_eq!(by_search.total_items, 2);

        let by_type = find_all(
            &store,
            Pagination::default(),
            SportSort::Az,
            None,
            Some("Surf".into()),
            None,
        )
        .await
        .unwrap();
        assert_eq!(by_type.total_items, 1);
        assert_eq!(by_type.data[0].title, "Surf lesson");

        let active_dives = find_all(
            &store,
            Pagination::default(),
            SportSort::Az,
            None,
            Some("Diving".into()),
            Some(StatusFilter::Active),
        )
        .await
        .unwrap();
        assert_eq!(active_dives.total_items, 1);
        assert_eq!(active_dives.data[0].title, "Reef dive");
    }

    #[tokio::test]
    async fn recommendations_stay_within_the_same_type() {
        let store = SoftDeleteStore::new(MemoryStore::new());
        let surfing = seed_type(&store, "Surfing").await;
        let diving = seed_type(&store, "Diving").await;

        let reference = create(&store, draft("Reef dive", 300_000, diving))
            .await
            .unwrap();
        create(&store, draft("Wreck dive", 350_000, diving))
            .await
            .unwrap();
        create(&store, draft("Surf lesson", 300_000, surfing))
            .await
            .unwrap();

        let detail = find_one(&store, reference.id.value(), window())
            .await
            .unwrap();
        assert_eq!(detail.recommendations.len(), 1);
        assert_eq!(detail.recommendations[0].title, "Wreck dive");
        assert_eq!(
            detail.sport_type.as_ref().map(|t| t.name.as_str()),
            Some("Diving")
        );
    }

    #[tokio::test]
    async fn remove_takes_the_images_down_with_the_activity() {
        let store = SoftDeleteStore::new(MemoryStore::new());
        let surfing = seed_type(&store, "Surfing").await;
        let created = create(&store, draft("Surf lesson", 250_000, surfing))
            .await
            .unwrap();
        let id = created.id.value();

        remove(&store, id).await.unwrap();

        assert!(repository::images_of(&store, id).await.unwrap().is_empty());
        let err = find_one(&store, id, window()).await.unwrap_err();
        assert!(matches!(err, DataError::NotFound));
    }
}
