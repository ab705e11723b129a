//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use nilan_domain::error::NilanError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`NilanError`] to an HTTP response with appropriate status code.
pub struct ApiError(NilanError);

impl From<NilanError> for ApiError {
    fn from(err: NilanError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            NilanError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            NilanError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            NilanError::Device(err) => {
                tracing::error!(error = %err, "device error");
                (StatusCode::BAD_GATEWAY, "device unavailable".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
