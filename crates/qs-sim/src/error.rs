use qs_core::QsError;
use qs_resource::RegistryError;
use qs_sample::SampleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] QsError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("{what}: {source}")]
    Distribution {
        what:   String,
        source: SampleError,
    },

    #[error("arrival limit `until_horizon` needs a horizon")]
    MissingHorizon,

    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("inconsistent process state: {0}")]
    Inconsistent(String),

    #[error("scenario parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
