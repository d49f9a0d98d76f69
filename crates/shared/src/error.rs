use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Configuration,
    Validation,
    Detached,
}

/// Serializable error body for hosts that speak JSON with the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CarouselError {
    #[error("item count must not be negative, got {0}")]
    NegativeItemCount(i64),
    #[error("autoplay interval must be positive, got {0} ms")]
    NonPositiveInterval(u128),
    #[error("visibility threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),
    #[error("initial index {index} is out of range for {len} items")]
    InitialIndexOutOfRange { index: usize, len: usize },
    #[error("unknown direction mode '{0}', expected 'linear' or 'circular'")]
    UnknownDirectionMode(String),
    #[error("carousel is detached")]
    Detached,
}

impl CarouselError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CarouselError::Detached => ErrorCode::Detached,
            CarouselError::UnknownDirectionMode(_) => ErrorCode::Validation,
            _ => ErrorCode::Configuration,
        }
    }
}

impl From<&CarouselError> for ErrorReport {
    fn from(value: &CarouselError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}
