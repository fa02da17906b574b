use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response::api::ApiErrorResponse;

#[derive(Error, Debug)]
pub enum StakingError {
    #[error("Staking state not found at height {0}")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl IntoResponse for StakingError {
    fn into_response(self) -> Response {
        let status_code = match self {
            StakingError::Unknown(_) | StakingError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            StakingError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        ApiErrorResponse::send(status_code.as_u16(), Some(self.to_string()))
    }
}
