use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a002_sport::aggregate::{Sport, SportDetail, SportDraft};
use contracts::enums::{SportSort, StatusFilter};
use contracts::shared::{Paged, Pagination};
use serde::Deserialize;
use serde_json::json;

use crate::api::error_status;
use crate::domain::a002_sport::service;
use crate::shared::config;
use crate::shared::data::db::store;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<SportSort>,
    pub search: Option<String>,
    pub sport_type: Option<String>,
    pub status: Option<StatusFilter>,
}

/// GET /api/sports
pub async fn list(Query(query): Query<SportListQuery>) -> Result<Json<Paged<Sport>>, StatusCode> {
    let pagination = Pagination::from_query(query.page, query.limit);
    let sort = query.sort.unwrap_or(SportSort::Az);
    service::find_all(
        store(),
        pagination,
        sort,
        query.search,
        query.sport_type,
        query.status,
    )
    .await
    .map(Json)
    .map_err(|e| error_status("sport list", &e))
}

/// GET /api/sports/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<SportDetail>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    let window = config::get().recommendation.sport;
    service::find_one(store(), uuid, window)
        .await
        .map(Json)
        .map_err(|e| error_status("sport detail", &e))
}

/// POST /api/sports
pub async fn create(Json(draft): Json<SportDraft>) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::create(store(), draft).await {
        Ok(sport) => Ok(Json(json!({"id": sport.id.value().to_string()}))),
        Err(e) => Err(error_status("sport create", &e)),
    }
}

/// PUT /api/sports/:id
pub async fn update(
    Path(id): Path<String>,
    Json(draft): Json<SportDraft>,
) -> Result<Json<Sport>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    service::update(store(), uuid, draft)
        .await
        .map(Json)
        .map_err(|e| error_status("sport update", &e))
}

/// PATCH /api/sports/:id/toggle-status
pub async fn toggle_status(Path(id): Path<String>) -> Result<Json<Sport>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    service::toggle_status(store(), uuid)
        .await
        .map(Json)
        .map_err(|e| error_status("sport toggle status", &e))
}

/// DELETE /api/sports/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    service::remove(store(), uuid)
        .await
        .map_err(|e| error_status("sport delete", &e))
}
