use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::api::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Holiday handlers
        .route(
            "/api/holidays",
            get(handlers::a001_holiday::list).post(handlers::a001_holiday::create),
        )
        .route(
            "/api/holidays/:id",
            get(handlers::a001_holiday::get_by_id)
                .put(handlers::a001_holiday::update)
                .delete(handlers::a001_holiday::delete),
        )
        // A002 Sport handlers
        .route(
            "/api/sports",
            get(handlers::a002_sport::list).post(handlers::a002_sport::create),
        )
        .route(
            "/api/sports/:id",
            get(handlers::a002_sport::get_by_id)
                .put(handlers::a002_sport::update)
                .delete(handlers::a002_sport::delete),
        )
        .route(
            "/api/sports/:id/toggle-status",
            patch(handlers::a002_sport::toggle_status),
        )
        // A003 Sport type handlers
        .route(
            "/api/sport-types",
            get(handlers::a003_sport_type::list_all).post(handlers::a003_sport_type::create),
        )
        .route(
            "/api/sport-types/testdata",
            post(handlers::a003_sport_type::insert_test_data),
        )
        .route(
            "/api/sport-types/:id",
            get(handlers::a003_sport_type::get_by_id)
                .put(handlers::a003_sport_type::update)
                .delete(handlers::a003_sport_type::delete),
        )
}
