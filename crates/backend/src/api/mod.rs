pub mod handlers;

use axum::http::StatusCode;

use crate::shared::data::error::DataError;

/// Map a data-layer error onto the wire status. Store failures are the only
/// kind logged here; the rest are ordinary request outcomes.
pub fn error_status(context: &str, err: &DataError) -> StatusCode {
    match err {
        DataError::NotFound => StatusCode::NOT_FOUND,
        DataError::Conflict(_) => StatusCode::CONFLICT,
        DataError::Constraint(_) => StatusCode::BAD_REQUEST,
        DataError::Store(_) => {
            tracing::error!("{}: {}", context, err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
