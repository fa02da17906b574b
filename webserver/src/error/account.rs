use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response::api::ApiErrorResponse;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Account not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let status_code = match self {
            AccountError::Unknown(_) | AccountError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AccountError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        ApiErrorResponse::send(status_code.as_u16(), Some(self.to_string()))
    }
}
