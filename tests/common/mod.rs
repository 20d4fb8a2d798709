// Shared helpers for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use permshell::gate::{GateConfig, Notifier, NotifyError, PermissionGate, Prompt};
use permshell::orchestrator::{Orchestrator, OrchestratorConfig};
use permshell::runner::CommandRunner;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_test_writer()
            .init();
    });
}

/// What the scripted human does with the next prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Allow,
    Deny,
    /// The dialog gives up on its own
    Expire,
    /// The dialog cannot be shown at all
    Unavailable,
    /// Nobody ever answers
    Hang,
}

/// Notifier that answers from a script and records every prompt
pub struct ScriptedNotifier {
    answers: Mutex<VecDeque<Answer>>,
    fallback: Answer,
    prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedNotifier {
    /// Answers `script` in order, then `fallback` forever
    pub fn new(script: &[Answer], fallback: Answer) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(script.iter().copied().collect()),
            fallback,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn always(answer: Answer) -> Arc<Self> {
        Self::new(&[], answer)
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for ScriptedNotifier {
    async fn present(&self, prompt: &Prompt) -> Result<bool, NotifyError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback);

        match answer {
            Answer::Allow => Ok(true),
            Answer::Deny => Ok(false),
            Answer::Expire => Err(NotifyError::Expired),
            Answer::Unavailable => Err(NotifyError::Unavailable("no display".to_string())),
            Answer::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(true)
            }
        }
    }
}

pub fn gate(notifier: Arc<ScriptedNotifier>, notifications_disabled: bool) -> PermissionGate {
    let config = GateConfig {
        notifications_disabled,
        ..Default::default()
    };
    PermissionGate::new(config, notifier)
}

/// Orchestrator with a short approval wait so timeouts resolve quickly
pub fn orchestrator(notifier: Arc<ScriptedNotifier>, notifications_disabled: bool) -> Orchestrator {
    let config = OrchestratorConfig {
        approval_wait: Duration::from_millis(200),
        ..Default::default()
    };
    Orchestrator::new(
        config,
        gate(notifier, notifications_disabled),
        CommandRunner::default(),
    )
}
