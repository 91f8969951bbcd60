//! Request extractors with JSON error responses.
//!
//! Axum's default `Json` rejection replies with plain text and a mix of
//! status codes. API clients expect the same `{"error", "message"}` shape
//! the handlers produce, so body extraction goes through [`ApiJson`].

use axum::Json;
use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// JSON body extractor that rejects malformed payloads with a 400 response.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(BodyRejection))]
pub struct ApiJson<T>(pub T);

/// Rejection emitted when a request body fails to parse.
pub struct BodyRejection {
    message: String,
}

impl From<JsonRejection> for BodyRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_body",
                "message": self.message,
            })),
        )
            .into_response()
    }
}
