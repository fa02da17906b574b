use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::account::AccountError;
use super::block::BlockError;
use super::staking::StakingError;
use super::transaction::TransactionError;
use super::validator::ValidatorError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    BlockError(#[from] BlockError),
    #[error(transparent)]
    TransactionError(#[from] TransactionError),
    #[error(transparent)]
    ValidatorError(#[from] ValidatorError),
    #[error(transparent)]
    StakingError(#[from] StakingError),
    #[error(transparent)]
    AccountError(#[from] AccountError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BlockError(error) => error.into_response(),
            ApiError::TransactionError(error) => error.into_response(),
            ApiError::ValidatorError(error) => error.into_response(),
            ApiError::StakingError(error) => error.into_response(),
            ApiError::AccountError(error) => error.into_response(),
        }
    }
}
