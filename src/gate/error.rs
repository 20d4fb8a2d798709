// Error types for Gate module

use thiserror::Error;

/// Failures of the notification channel itself
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("no approval prompt available: {0}")]
    Unavailable(String),

    #[error("approval prompt failed: {0}")]
    Failed(String),

    #[error("approval prompt expired without an answer")]
    Expired,
}

pub type Result<T> = std::result::Result<T, NotifyError>;
