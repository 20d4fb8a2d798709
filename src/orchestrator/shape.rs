// Turning execution results into tool responses

use crate::orchestrator::error::ToolError;
use crate::orchestrator::search::SearchStrategy;
use crate::orchestrator::types::{ToolContent, ToolResponse};
use crate::runner::{ExecutionResult, ExitStatus};
use std::path::Path;
use std::time::Duration;

pub const NO_OUTPUT: &str = "Command executed successfully with no output";

/// Cut `text` to at most `max_bytes` on a char boundary, noting the original size
pub fn cap_output(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!(
        "{}\n[output truncated: {} bytes total]",
        &text[..end],
        text.len()
    )
}

/// The failure a non-successful status stands for
pub fn execution_error(status: &ExitStatus, timeout: Duration) -> Option<ToolError> {
    match status {
        ExitStatus::Success => None,
        ExitStatus::NonZeroExit(code) => Some(ToolError::ExecutionFailure(format!(
            "Command failed with exit code {code}"
        ))),
        ExitStatus::TimedOut => Some(ToolError::ExecutionTimeout {
            timeout_ms: timeout.as_millis() as u64,
        }),
        ExitStatus::SpawnFailed(reason) => Some(ToolError::ExecutionFailure(format!(
            "Failed to start shell: {reason}"
        ))),
    }
}

/// Response for `execute-command`
pub fn command_response(
    result: &ExecutionResult,
    timeout: Duration,
    max_bytes: usize,
) -> ToolResponse {
    let stdout = cap_output(&result.stdout, max_bytes);
    let stderr = cap_output(&result.stderr, max_bytes);

    match execution_error(&result.status, timeout) {
        None => {
            let mut content = vec![ToolContent::text(if stdout.is_empty() {
                NO_OUTPUT.to_string()
            } else {
                stdout
            })];
            if !stderr.is_empty() {
                content.push(ToolContent::text(format!("Standard Error:\n{stderr}")));
            }
            ToolResponse::success(content)
        }
        Some(failure) => {
            let mut content = Vec::new();
            if !stdout.is_empty() {
                content.push(ToolContent::text(stdout));
            }
            content.push(ToolContent::text(format!(
                "Error executing command: {failure}\n{stderr}"
            )));
            ToolResponse::error(content)
        }
    }
}

/// Response for `find-files`
pub fn search_response(
    strategy: SearchStrategy,
    result: &ExecutionResult,
    pattern: &str,
    dir: &Path,
    timeout: Duration,
    max_bytes: usize,
) -> ToolResponse {
    if strategy.found_nothing(result) {
        return ToolResponse::text(format!(
            "No files matching \"{pattern}\" found in {}",
            dir.display()
        ));
    }
    match execution_error(&result.status, timeout) {
        None => ToolResponse::text(cap_output(&result.stdout, max_bytes)),
        Some(failure) => ToolResponse::error_text(format!(
            "Error finding files: {failure}\n{}",
            cap_output(&result.stderr, max_bytes)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(30_000);

    fn result(stdout: &str, stderr: &str, status: ExitStatus) -> ExecutionResult {
        ExecutionResult {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            status,
        }
    }

    #[test]
    fn test_success_with_output() {
        let response = command_response(&result("hello\n", "", ExitStatus::Success), TIMEOUT, 1024);
        assert!(!response.is_error);
        assert_eq!(response.content, vec![ToolContent::text("hello\n")]);
    }

    #[test]
    fn test_success_without_output_uses_sentinel() {
        let response = command_response(&result("", "", ExitStatus::Success), TIMEOUT, 1024);
        assert!(!response.is_error);
        assert_eq!(response.content, vec![ToolContent::text(NO_OUTPUT)]);
    }

    #[test]
    fn test_success_with_stderr_adds_second_block() {
        let response =
            command_response(&result("", "warning\n", ExitStatus::Success), TIMEOUT, 1024);
        assert!(!response.is_error);
        assert_eq!(response.content.len(), 2);
        assert_eq!(response.content[0].as_text(), NO_OUTPUT);
        assert_eq!(response.content[1].as_text(), "Standard Error:\nwarning\n");
    }

    #[test]
    fn test_non_zero_exit_keeps_both_streams() {
        let response = command_response(
            &result("partial\n", "boom\n", ExitStatus::NonZeroExit(2)),
            TIMEOUT,
            1024,
        );
        assert!(response.is_error);
        assert_eq!(response.content.len(), 2);
        assert_eq!(response.content[0].as_text(), "partial\n");
        assert_eq!(
            response.content[1].as_text(),
            "Error executing command: Command failed with exit code 2\nboom\n"
        );
    }

    #[test]
    fn test_timeout_without_stdout_has_single_error_block() {
        let response = command_response(
            &result("", "", ExitStatus::TimedOut),
            Duration::from_millis(500),
            1024,
        );
        assert!(response.is_error);
        assert_eq!(response.content.len(), 1);
        assert!(response.content[0].as_text().contains("timed out after 500 ms"));
    }

    #[test]
    fn test_spawn_failure() {
        let response = command_response(
            &ExecutionResult::spawn_failed("No such file or directory"),
            TIMEOUT,
            1024,
        );
        assert!(response.is_error);
        assert!(response.joined_text().contains("Failed to start shell"));
    }

    #[test]
    fn test_cap_output() {
        assert_eq!(cap_output("short", 10), "short");

        let capped = cap_output(&"x".repeat(20), 8);
        assert!(capped.starts_with("xxxxxxxx\n"));
        assert!(capped.ends_with("[output truncated: 20 bytes total]"));

        // 'é' is two bytes, the cut must not split it
        let capped = cap_output("ééé", 3);
        assert!(capped.starts_with("é\n"));
    }

    #[test]
    fn test_search_response_no_matches() {
        let response = search_response(
            SearchStrategy::PosixFind,
            &result("", "", ExitStatus::Success),
            "*.nope",
            Path::new("/data"),
            TIMEOUT,
            1024,
        );
        assert!(!response.is_error);
        assert_eq!(
            response.joined_text(),
            "No files matching \"*.nope\" found in /data"
        );
    }

    #[test]
    fn test_search_response_failure() {
        let response = search_response(
            SearchStrategy::PosixFind,
            &result("", "find: '/x': Permission denied\n", ExitStatus::NonZeroExit(1)),
            "*.rs",
            Path::new("/x"),
            TIMEOUT,
            1024,
        );
        assert!(response.is_error);
        assert!(response.joined_text().starts_with("Error finding files:"));
        assert!(response.joined_text().contains("Permission denied"));
    }
}
