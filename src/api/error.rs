use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::protocol::{ErrorResponse, MSG_DUPLICATE_NAME, MSG_INTERNAL, MSG_MALFORMED_ID};
use crate::contacts::StoreError;

/// A failed request. Wraps the store taxonomy so handlers can use `?`.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self(StoreError::Validation(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            StoreError::Validation(message) => {
                tracing::debug!("Rejected request: {}", message);
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
            }
            StoreError::Conflict { name } => {
                tracing::debug!("Rejected duplicate name {:?}", name);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(MSG_DUPLICATE_NAME)),
                )
                    .into_response()
            }
            StoreError::NotFound => StatusCode::NOT_FOUND.into_response(),
            StoreError::MalformedId(raw) => {
                tracing::debug!("Rejected malformed id {:?}", raw);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(MSG_MALFORMED_ID)),
                )
                    .into_response()
            }
            StoreError::Unavailable(err) => {
                tracing::error!("Contact store failure: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(MSG_INTERNAL)),
                )
                    .into_response()
            }
        }
    }
}
