// src/api/error.rs
//
// HTTP mapping for the application error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Storage failures get logged with full detail and leave the
        // process with a generic body.
        if matches!(
            self,
            Self::Database(_) | Self::Pool(_) | Self::Internal(_)
        ) {
            log::error!("request failed: {}", self);
        }

        let status = match &self {
            Self::Domain(_) | Self::MissingId => StatusCode::BAD_REQUEST,
            Self::NotFound(_, _) => StatusCode::NOT_FOUND,
            Self::UpdateConflict(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database(_) | Self::Pool(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            Self::Database(_) | Self::Pool(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
