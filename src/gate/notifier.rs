// Notification boundary between the gate and whatever shows the prompt

use crate::gate::error::Result;
use async_trait::async_trait;

/// One approval prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub message: String,
    /// How long the prompt should stay up before giving up
    pub wait_secs: u64,
}

/// Presents a binary Allow / Deny choice to a human.
///
/// `Ok(true)` means allowed, `Ok(false)` denied. A prompt that expires on
/// its own reports [`NotifyError::Expired`](crate::gate::NotifyError::Expired).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn present(&self, prompt: &Prompt) -> Result<bool>;
}
