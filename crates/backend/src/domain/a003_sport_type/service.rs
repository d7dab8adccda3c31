use contracts::domain::a003_sport_type::aggregate::{SportType, SportTypeDraft};
use uuid::Uuid;

use super::repository;
use crate::shared::data::error::DataError;
use crate::shared::data::store::RecordStore;

/// Create a category; names are unique among live records
pub async fn create(store: &dyn RecordStore, draft: SportTypeDraft) -> Result<SportType, DataError> {
    if repository::find_by_name(store, &draft.name, None)
        .await?
        .is_some()
    {
        return Err(DataError::Conflict(format!(
            "sport type `{}` already exists",
            draft.name
        )));
    }
    let aggregate = SportType::new_for_insert(draft.name);
    repository::insert(store, &aggregate).await?;
    Ok(aggregate)
}

pub async fn find_all(store: &dyn RecordStore) -> Result<Vec<SportType>, DataError> {
    repository::list_all(store).await
}

pub async fn find_one(store: &dyn RecordStore, id: Uuid) -> Result<SportType, DataError> {
    repository::get_by_id(store, id).await
}

/// Rename a category; the uniqueness check excludes the record itself
pub async fn update(
    store: &dyn RecordStore,
    id: Uuid,
    draft: SportTypeDraft,
) -> Result<SportType, DataError> {
    repository::get_by_id(store, id).await?;
    if repository::find_by_name(store, &draft.name, Some(id))
        .await?
        .is_some()
    {
        return Err(DataError::Conflict(format!(
            "sport type `{}` already exists",
            draft.name
        )));
    }
    repository::update_name(store, id, &draft.name).await?;
    repository::get_by_id(store, id).await
}

pub async fn remove(store: &dyn RecordStore, id: Uuid) -> Result<(), DataError> {
    repository::get_by_id(store, id).await?;
    repository::soft_delete(store, id).await?;
    Ok(())
}

/// Seed a few categories for manual testing
pub async fn insert_test_data(store: &dyn RecordStore) -> Result<(), DataError> {
    for name in ["Surfing", "Diving", "Hiking", "Rafting"] {
        if repository::find_by_name(store, name, None).await?.is_none() {
            create(
                store,
                SportTypeDraft {
                    name: name.to_string(),
                },
            )
            .await?;
        }
    }
    Ok(())
}
