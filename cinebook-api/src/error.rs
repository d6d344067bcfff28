use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cinebook_core::StoreError;
use serde_json::json;

/// Failures of the admin surface, translated to HTTP statuses here so
/// the core stays ignorant of the transport vocabulary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::AlreadyExists(_))
            | ApiError::Store(StoreError::AlreadyAssociated { .. }) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
