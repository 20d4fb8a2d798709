// Desktop approval prompts through the host's dialog tool

use crate::gate::error::{NotifyError, Result};
use crate::gate::notifier::{Notifier, Prompt};
use async_trait::async_trait;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

const ALLOW: &str = "Allow";
const DENY: &str = "Deny";

// zenity exit codes
const ZENITY_OK: i32 = 0;
const ZENITY_CANCEL: i32 = 1;
const ZENITY_TIMEOUT: i32 = 5;

// WScript.Shell.Popup return values
const POPUP_YES: &str = "6";
const POPUP_NO: &str = "7";
const POPUP_TIMEOUT: &str = "-1";

/// Which dialog tool shows the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogBackend {
    /// `zenity --question` on Linux and the BSDs
    Zenity,
    /// `osascript` `display dialog` on macOS
    AppleScript,
    /// PowerShell `WScript.Shell.Popup` on Windows
    PowerShell,
}

impl DialogBackend {
    pub fn for_host() -> Self {
        if cfg!(target_os = "macos") {
            Self::AppleScript
        } else if cfg!(windows) {
            Self::PowerShell
        } else {
            Self::Zenity
        }
    }

    fn program(&self) -> &'static str {
        match self {
            Self::Zenity => "zenity",
            Self::AppleScript => "osascript",
            Self::PowerShell => "powershell",
        }
    }

    /// Arguments for one prompt
    pub fn args(&self, prompt: &Prompt) -> Vec<String> {
        match self {
            Self::Zenity => vec![
                "--question".to_string(),
                "--no-markup".to_string(),
                format!("--title={}", prompt.title),
                format!("--text={}", prompt.message),
                format!("--ok-label={ALLOW}"),
                format!("--cancel-label={DENY}"),
                format!("--timeout={}", prompt.wait_secs),
            ],
            Self::AppleScript => {
                let script = format!(
                    "display dialog {} with title {} buttons {{\"{DENY}\", \"{ALLOW}\"}} \
                     default button \"{ALLOW}\" giving up after {}",
                    applescript_quote(&prompt.message),
                    applescript_quote(&prompt.title),
                    prompt.wait_secs
                );
                vec!["-e".to_string(), script]
            }
            Self::PowerShell => {
                // 4 = Yes/No buttons, 32 = question icon
                let script = format!(
                    "$r = (New-Object -ComObject WScript.Shell).Popup({}, {}, {}, 36); Write-Output $r",
                    powershell_quote(&format!("{}\n\n{ALLOW}?", prompt.message)),
                    prompt.wait_secs,
                    powershell_quote(&prompt.title)
                );
                vec![
                    "-NoProfile".to_string(),
                    "-NonInteractive".to_string(),
                    "-Command".to_string(),
                    script,
                ]
            }
        }
    }

    /// Refuse early when the backend obviously cannot display anything.
    /// `env` looks up environment variables.
    fn check_available<F>(&self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        if *self == Self::Zenity && env("DISPLAY").is_none() && env("WAYLAND_DISPLAY").is_none() {
            return Err(NotifyError::Unavailable(
                "no graphical display (DISPLAY/WAYLAND_DISPLAY unset)".to_string(),
            ));
        }
        Ok(())
    }

    /// Map the dialog tool's exit code and output to an answer
    pub fn interpret(&self, code: Option<i32>, stdout: &str, stderr: &str) -> Result<bool> {
        match self {
            Self::Zenity => match code {
                Some(ZENITY_OK) => Ok(true),
                Some(ZENITY_CANCEL) => Ok(false),
                Some(ZENITY_TIMEOUT) => Err(NotifyError::Expired),
                _ => Err(failure(code, stderr)),
            },
            Self::AppleScript => {
                if code != Some(0) {
                    return Err(failure(code, stderr));
                }
                if stdout.contains("gave up:true") {
                    Err(NotifyError::Expired)
                } else if stdout.contains(&format!("button returned:{ALLOW}")) {
                    Ok(true)
                } else if stdout.contains(&format!("button returned:{DENY}")) {
                    Ok(false)
                } else {
                    Err(NotifyError::Failed(format!(
                        "unexpected dialog output: {}",
                        stdout.trim()
                    )))
                }
            }
            Self::PowerShell => {
                if code != Some(0) {
                    return Err(failure(code, stderr));
                }
                match stdout.trim() {
                    POPUP_YES => Ok(true),
                    POPUP_NO => Ok(false),
                    POPUP_TIMEOUT => Err(NotifyError::Expired),
                    other => Err(NotifyError::Failed(format!(
                        "unexpected popup result: {other}"
                    ))),
                }
            }
        }
    }
}

fn failure(code: Option<i32>, stderr: &str) -> NotifyError {
    NotifyError::Failed(format!(
        "dialog exited with {}: {}",
        code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
        stderr.trim()
    ))
}

fn applescript_quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

fn powershell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Shows approval prompts as native desktop dialogs
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    backend: DialogBackend,
}

impl DesktopNotifier {
    pub fn new(backend: DialogBackend) -> Self {
        Self { backend }
    }

    pub fn for_host() -> Self {
        Self::new(DialogBackend::for_host())
    }

    pub fn backend(&self) -> DialogBackend {
        self.backend
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn present(&self, prompt: &Prompt) -> Result<bool> {
        self.backend.check_available(|name| std::env::var_os(name))?;

        let program = self.backend.program();
        debug!(program, "opening approval dialog");

        // Dropped when the gate's own timer wins, which closes the dialog
        let output = Command::new(program)
            .args(self.backend.args(prompt))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    NotifyError::Unavailable(format!("{program} is not installed"))
                }
                _ => NotifyError::Failed(format!("failed to start {program}: {e}")),
            })?;

        self.backend.interpret(
            output.status.code(),
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> Prompt {
        Prompt {
            title: "Shell Command Permission Request".to_string(),
            message: "Execute: echo \"hi\" (in /tmp)".to_string(),
            wait_secs: 60,
        }
    }

    #[test]
    fn test_zenity_exit_codes() {
        let backend = DialogBackend::Zenity;
        assert!(backend.interpret(Some(0), "", "").unwrap());
        assert!(!backend.interpret(Some(1), "", "").unwrap());
        assert!(matches!(
            backend.interpret(Some(5), "", ""),
            Err(NotifyError::Expired)
        ));
        assert!(matches!(
            backend.interpret(Some(255), "", "cannot open display"),
            Err(NotifyError::Failed(_))
        ));
    }

    #[test]
    fn test_zenity_args_carry_labels_and_timeout() {
        let args = DialogBackend::Zenity.args(&prompt());
        assert!(args.contains(&"--ok-label=Allow".to_string()));
        assert!(args.contains(&"--cancel-label=Deny".to_string()));
        assert!(args.contains(&"--timeout=60".to_string()));
        assert!(args.contains(&"--text=Execute: echo \"hi\" (in /tmp)".to_string()));
    }

    #[test]
    fn test_applescript_output() {
        let backend = DialogBackend::AppleScript;
        assert!(
            backend
                .interpret(Some(0), "button returned:Allow, gave up:false\n", "")
                .unwrap()
        );
        assert!(
            !backend
                .interpret(Some(0), "button returned:Deny, gave up:false\n", "")
                .unwrap()
        );
        assert!(matches!(
            backend.interpret(Some(0), "button returned:, gave up:true\n", ""),
            Err(NotifyError::Expired)
        ));
        assert!(matches!(
            backend.interpret(Some(1), "", "execution error"),
            Err(NotifyError::Failed(_))
        ));
    }

    #[test]
    fn test_applescript_escapes_quotes() {
        let args = DialogBackend::AppleScript.args(&prompt());
        assert_eq!(args[0], "-e");
        assert!(args[1].contains(r#""Execute: echo \"hi\" (in /tmp)""#));
        assert!(args[1].contains("giving up after 60"));
    }

    #[test]
    fn test_powershell_popup_results() {
        let backend = DialogBackend::PowerShell;
        assert!(backend.interpret(Some(0), "6\r\n", "").unwrap());
        assert!(!backend.interpret(Some(0), "7\r\n", "").unwrap());
        assert!(matches!(
            backend.interpret(Some(0), "-1\r\n", ""),
            Err(NotifyError::Expired)
        ));
    }

    #[test]
    fn test_zenity_needs_a_display() {
        let backend = DialogBackend::Zenity;

        let headless = backend.check_available(|_| None);
        assert!(matches!(headless, Err(NotifyError::Unavailable(_))));

        let x11 = |name: &str| (name == "DISPLAY").then(|| OsString::from(":0"));
        assert!(backend.check_available(x11).is_ok());

        let wayland = |name: &str| (name == "WAYLAND_DISPLAY").then(|| OsString::from("wayland-0"));
        assert!(backend.check_available(wayland).is_ok());
    }

    #[test]
    fn test_other_backends_skip_display_check() {
        for backend in [DialogBackend::AppleScript, DialogBackend::PowerShell] {
            assert!(backend.check_available(|_| None).is_ok());
        }
    }

    #[test]
    fn test_powershell_quotes_single_quotes() {
        assert_eq!(powershell_quote("it's"), "'it''s'");
    }
}
