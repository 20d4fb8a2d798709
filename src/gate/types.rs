// Data types for Gate module

use std::path::{Path, PathBuf};

const ELLIPSIS: &str = "...";

/// Shorten `text` to at most `max_chars` characters for display.
///
/// Longer text keeps its first `max_chars - 3` characters followed by `...`.
/// Limits too small to fit the ellipsis cut the text without one.
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= ELLIPSIS.len() {
        return text.chars().take(max_chars).collect();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionKind {
    Execute,
    Search,
}

/// Description of a pending side-effecting operation, shown for approval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    kind: ActionKind,
    summary: String,
    location: PathBuf,
    requires_input: bool,
}

impl ActionRequest {
    /// Shell command about to run in `dir`
    pub fn execute(command: &str, dir: &Path, requires_input: bool, max_chars: usize) -> Self {
        Self {
            kind: ActionKind::Execute,
            summary: truncate_summary(command, max_chars),
            location: dir.to_path_buf(),
            requires_input,
        }
    }

    /// File search for `pattern` under `dir`
    pub fn search(pattern: &str, dir: &Path, max_chars: usize) -> Self {
        Self {
            kind: ActionKind::Search,
            summary: truncate_summary(pattern, max_chars),
            location: dir.to_path_buf(),
            requires_input: false,
        }
    }

    /// Truncated command or pattern
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn requires_input(&self) -> bool {
        self.requires_input
    }

    /// Full prompt text
    pub fn message(&self) -> String {
        match self.kind {
            ActionKind::Execute => {
                let mut message =
                    format!("Execute: {} (in {})", self.summary, self.location.display());
                if self.requires_input {
                    message.push_str(" with provided standard input");
                }
                message
            }
            ActionKind::Search => format!(
                "Search for files matching \"{}\" in {}",
                self.summary,
                self.location.display()
            ),
        }
    }
}

/// Outcome of one approval attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionDecision {
    Approved,
    Denied,
    TimedOut,
    /// The prompt could not be shown; never counts as approval
    SystemError(String),
}
