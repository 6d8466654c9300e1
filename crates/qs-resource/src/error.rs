use thiserror::Error;

use qs_core::QsError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("pool {0:?} is declared twice")]
    DuplicatePool(String),

    #[error("stage refers to undeclared pool {0:?}")]
    UnknownPool(String),

    #[error(transparent)]
    Core(#[from] QsError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
