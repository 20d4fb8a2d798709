// Gate module - human-in-the-loop approval for side-effecting actions

pub mod approval;
pub mod config;
pub mod desktop;
pub mod error;
pub mod notifier;
pub mod types;

pub use approval::PermissionGate;
pub use config::GateConfig;
pub use desktop::{DesktopNotifier, DialogBackend};
pub use error::NotifyError;
pub use notifier::{Notifier, Prompt};
pub use types::{ActionRequest, PermissionDecision, truncate_summary};
