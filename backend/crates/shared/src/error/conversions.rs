//! Error conversions
//!
//! HTTP rendering of [`AppError`] behind the `axum` feature.

#[cfg(feature = "axum")]
use super::app_error::AppError;

/// Error bodies are always `{"msg": "..."}`.
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({ "msg": self.public_message() });

        (status, Json(body)).into_response()
    }
}
