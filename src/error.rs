use thiserror::Error;

use crate::phase::TaskPhase;

#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("Unknown phase tag: {0}")]
    UnknownPhase(String),

    #[error("Phase {0} has no structured description block")]
    NotDescriptionPhase(TaskPhase),

    #[error("Invalid spacing value: {0} (expected `canonical` or `legacy`)")]
    InvalidSpacing(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DescriptionError>;
