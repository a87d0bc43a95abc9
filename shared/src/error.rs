use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MainError {
    #[error("RPC error")]
    RpcError,
    #[error("Can't fetch coins from registry")]
    RegistryError,
    #[error("Can't write balances snapshot")]
    Snapshot,
    #[error("Invalid configuration")]
    Config,
    #[error("Failed to join async task")]
    TaskJoinError,
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

pub trait AsRegistryError<T> {
    fn into_registry_error(self) -> Result<T, MainError>;
}

impl<T> AsRegistryError<T> for anyhow::Result<T> {
    #[inline]
    fn into_registry_error(self) -> Result<T, MainError> {
        self.map_err(|reason| {
            tracing::error!(?reason, "Registry error");
            MainError::RegistryError
        })
    }
}

pub trait AsSnapshotError<T> {
    fn into_snapshot_error(self) -> Result<T, MainError>;
}

impl<T> AsSnapshotError<T> for anyhow::Result<T> {
    #[inline]
    fn into_snapshot_error(self) -> Result<T, MainError> {
        self.map_err(|reason| {
            tracing::error!(?reason, "Snapshot error");
            MainError::Snapshot
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
            tracing::error!(?reason, "{}", MainError::Config);
            MainError::Config
        })
    }
}

pub trait AsTaskJoinError<T> {
    fn into_task_join_error(self) -> Result<T, MainError>;
}

impl<T> AsTaskJoinError<T> for anyhow::Result<T> {
    #[inline]
    fn into_task_join_error(self) -> Result<T, MainError> {
        self.map_err(|reason| {
            tracing::error!(?reason, "{}", MainError::TaskJoinError);
            MainError::TaskJoinError
        })
    }
}
