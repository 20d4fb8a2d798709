// Permission gate implementation

use crate::gate::config::GateConfig;
use crate::gate::error::NotifyError;
use crate::gate::notifier::{Notifier, Prompt};
use crate::gate::types::{ActionRequest, PermissionDecision};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Asks a human before anything side-effecting runs
pub struct PermissionGate {
    config: GateConfig,
    notifier: Arc<dyn Notifier>,
}

impl PermissionGate {
    pub fn new(config: GateConfig, notifier: Arc<dyn Notifier>) -> Self {
        if config.notifications_disabled {
            warn!("notifications disabled, every action will be auto-approved");
        }
        Self { config, notifier }
    }

    /// Whether every action is approved without a prompt
    pub fn notifications_disabled(&self) -> bool {
        self.config.notifications_disabled
    }

    /// Present `action` once and wait up to `wait` for an answer.
    ///
    /// Each call shows exactly one prompt unless notifications are disabled,
    /// in which case it approves immediately without showing anything.
    pub async fn request_approval(
        &self,
        action: &ActionRequest,
        wait: Duration,
    ) -> PermissionDecision {
        if self.config.notifications_disabled {
            info!(action = %action.summary(), "auto-allowing action (notifications disabled)");
            return PermissionDecision::Approved;
        }

        let prompt = Prompt {
            title: self.config.title.clone(),
            message: action.message(),
            wait_secs: wait.as_secs().max(1),
        };

        debug!(
            message = %prompt.message,
            wait_secs = prompt.wait_secs,
            "presenting approval prompt"
        );

        let decision = match timeout(wait, self.notifier.present(&prompt)).await {
            Ok(Ok(true)) => PermissionDecision::Approved,
            Ok(Ok(false)) => PermissionDecision::Denied,
            Ok(Err(NotifyError::Expired)) | Err(_) => PermissionDecision::TimedOut,
            Ok(Err(e)) => {
                warn!(error = %e, "approval prompt could not be shown");
                PermissionDecision::SystemError(e.to_string())
            }
        };

        info!(action = %action.summary(), decision = ?decision, "approval decided");
        decision
    }
}
