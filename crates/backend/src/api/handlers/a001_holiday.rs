use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_holiday::aggregate::{Holiday, HolidayDetail, HolidayDraft};
use contracts::enums::HolidaySort;
use contracts::shared::{Paged, Pagination};
use serde::Deserialize;
use serde_json::json;

use crate::api::error_status;
use crate::domain::a001_holiday::service;
use crate::shared::config;
use crate::shared::data::db::store;

#[derive(Debug, Deserialize)]
pub struct HolidayListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<HolidaySort>,
}

/// GET /api/holidays
pub async fn list(
    Query(query): Query<HolidayListQuery>,
) -> Result<Json<Paged<Holiday>>, StatusCode> {
    let pagination = Pagination::from_query(query.page, query.limit);
    let sort = query.sort.unwrap_or(HolidaySort::Az);
    service::find_all(store(), pagination, sort)
        .await
        .map(Json)
        .map_err(|e| error_status("holiday list", &e))
}

/// GET /api/holidays/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<HolidayDetail>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    let window = config::get().recommendation.holiday;
    service::find_one(store(), uuid, window)
        .await
        .map(Json)
        .map_err(|e| error_status("holiday detail", &e))
}

/// POST /api/holidays
pub async fn create(
    Json(draft): Json<HolidayDraft>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::create(store(), draft).await {
        Ok(holiday) => Ok(Json(json!({"id": holiday.id.value().to_string()}))),
        Err(e) => Err(error_status("holiday create", &e)),
    }
}

/// PUT /api/holidays/:id
pub async fn update(
    Path(id): Path<String>,
    Json(draft): Json<HolidayDraft>,
) -> Result<Json<Holiday>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    service::update(store(), uuid, draft)
        .await
        .map(Json)
        .map_err(|e| error_status("holiday update", &e))
}

/// DELETE /api/holidays/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    service::remove(store(), uuid)
        .await
        .map_err(|e| error_status("holiday delete", &e))
}
