use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    #[error("invalid {kind} distribution: {reason}")]
    InvalidParameter {
        kind:   &'static str,
        reason: String,
    },
}

pub type SampleResult<T> = Result<T, SampleError>;
