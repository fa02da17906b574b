use thiserror::Error;

pub mod account;
pub mod block;
pub mod database;
pub mod delegation;
pub mod event;
pub mod report;
pub mod staking;
pub mod summary;
pub mod syncable;
pub mod transaction;
pub mod validator;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub(crate) fn check_err(err: diesel::result::Error) -> StoreError {
    match err {
        diesel::result::Error::NotFound => StoreError::NotFound,
        other => StoreError::Other(anyhow::Error::new(other)),
    }
}
