use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct ApiErrorResponse {
    pub message: String,
}

impl ApiErrorResponse {
    pub fn send(code: u16, message: Option<String>) -> Response {
        let status = StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(ApiErrorResponse {
                message: message.unwrap_or_default(),
            }),
        )
            .into_response()
    }
}
