// Runner module - bounded shell subprocess execution
// Spawns one host shell per command, captures both streams, kills on timeout.

pub mod config;
pub mod process;
pub mod types;

pub use config::RunnerConfig;
pub use process::CommandRunner;
pub use types::{ExecutionResult, ExecutionSpec, ExitStatus};
