use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MainError {
    #[error("No action error")]
    NoAction,
    #[error("RPC error")]
    RpcError,
    #[error("Database error")]
    Database,
    #[error("Configuration error")]
    Config,
    #[error("Indexing error")]
    Indexing,
}

pub trait AsRpcError<T> {
    fn into_rpc_error(self) -> Result<T, MainError>;
}

impl<T> AsRpcError<T> for anyhow::Result<T> {
    #[inline]
    fn into_rpc_error(self) -> Result<T, MainError> {
        self.map_err(|reason| {
            tracing::error!(?reason, "RPC error");
            MainError::RpcError
        })
    }
}

pub trait AsDbError<T> {
    fn into_db_error(self) -> Result<T, MainError>;
}

impl<T> AsDbError<T> for anyhow::Result<T> {
    #[inline]
    fn into_db_error(self) -> Result<T, MainError> {
        self.map_err(|reason| {
            tracing::error!(?reason, "Database error");
            MainError::Database
        })
    }
}

pub trait AsConfigError<T> {
    fn into_config_error(self) -> Result<T, MainError>;
}

impl<T> AsConfigError<T> for anyhow::Result<T> {
    #[inline]
    fn into_config_error(self) -> Result<T, MainError> {
        self.map_err(|reason| {
            tracing::error!(?reason, "Configuration error");
            MainError::Config
        })
    }
}

pub trait AsIndexingError<T> {
    fn into_indexing_error(self) -> Result<T, MainError>;
}

impl<T> AsIndexingError<T> for anyhow::Result<T> {
    #[inline]
    fn into_indexing_error(self) -> Result<T, MainError> {
        self.map_err(|reason| {
            tracing::error!(?reason, "Indexing error");
            MainError::Indexing
        })
    }
}

pub trait ContextDbInteractError<T> {
    fn context_db_interact_error(self) -> anyhow::Result<T>;
}

impl<T, E> ContextDbInteractError<T> for Result<T, E> {
    fn context_db_interact_error(self) -> anyhow::Result<T> {
        self.map_err(|_| anyhow::anyhow!("Failed to interact with db"))
    }
}
