use crate::api::TransportError;
use crate::config::ConfigError;
use crate::state::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("App has no active screen")]
    NotStarted,

    #[error("Store task failed: {0}")]
    ShutdownFailed(String),
}
