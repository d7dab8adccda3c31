use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a003_sport_type::aggregate::{SportType, SportTypeDraft};
use serde_json::json;

use crate::api::error_status;
use crate::domain::a003_sport_type::service;
use crate::shared::data::db::store;

/// GET /api/sport-types
pub async fn list_all() -> Result<Json<Vec<SportType>>, StatusCode> {
    service::find_all(store())
        .await
        .map(Json)
        .map_err(|e| error_status("sport type list", &e))
}

/// GET /api/sport-types/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<SportType>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    service::find_one(store(), uuid)
        .await
        .map(Json)
        .map_err(|e| error_status("sport type detail", &e))
}

/// POST /api/sport-types
pub async fn create(
    Json(draft): Json<SportTypeDraft>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::create(store(), draft).await {
        Ok(sport_type) => Ok(Json(json!({"id": sport_type.id.value().to_string()}))),
        Err(e) => Err(error_status("sport type create", &e)),
    }
}

/// PUT /api/sport-types/:id
pub async fn update(
    Path(id): Path<String>,
    Json(draft): Json<SportTypeDraft>,
) -> Result<Json<SportType>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    service::update(store(), uuid, draft)
        .await
        .map(Json)
        .map_err(|e| error_status("sport type update", &e))
}

/// DELETE /api/sport-types/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    service::remove(store(), uuid)
        .await
        .map_err(|e| error_status("sport type delete", &e))
}

/// POST /api/sport-types/testdata
pub async fn insert_test_data() -> Result<(), StatusCode> {
    service::insert_test_data(store())
        .await
        .map_err(|e| error_status("sport type test data", &e))
}
