// Runner configuration

use std::time::Duration;

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Shell program used to interpret commands
    pub shell: String,
    /// Flag that makes the shell read the command from its next argument
    pub shell_flag: String,
    /// How long to keep draining pipes after the shell has exited or been killed
    pub drain_grace: Duration,
}

impl RunnerConfig {
    /// Host default shell (`/bin/sh -c` or `cmd /C`)
    pub fn host_shell() -> (&'static str, &'static str) {
        if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("/bin/sh", "-c")
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        let (shell, flag) = Self::host_shell();
        Self {
            shell: shell.to_string(),
            shell_flag: flag.to_string(),
            drain_grace: Duration::from_millis(250),
        }
    }
}
