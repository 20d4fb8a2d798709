// File search command construction per host platform

use crate::runner::ExecutionResult;
use crate::runner::ExitStatus;
use std::path::Path;

/// How a file search is expressed as a shell command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// `find <dir> [-maxdepth N] -type f -name <pattern>`
    PosixFind,
    /// `dir /s /b <pattern>`, run from the search directory
    WindowsDir,
}

impl SearchStrategy {
    pub fn for_host() -> Self {
        if cfg!(windows) {
            Self::WindowsDir
        } else {
            Self::PosixFind
        }
    }

    /// Shell command searching `dir` for files named like `pattern`.
    /// `max_depth` only applies to `find`.
    pub fn command(&self, pattern: &str, dir: &Path, max_depth: Option<u32>) -> String {
        match self {
            Self::PosixFind => {
                let mut command = format!("find {}", posix_quote(&dir.to_string_lossy()));
                if let Some(depth) = max_depth {
                    command.push_str(&format!(" -maxdepth {depth}"));
                }
                command.push_str(&format!(" -type f -name {}", posix_quote(pattern)));
                command
            }
            Self::WindowsDir => format!("dir /s /b \"{}\"", pattern.replace('"', "")),
        }
    }

    /// Whether `result` is a completed search that found nothing
    pub fn found_nothing(&self, result: &ExecutionResult) -> bool {
        if !result.stdout.trim().is_empty() {
            return false;
        }
        match (self, &result.status) {
            (_, ExitStatus::Success) => true,
            // `dir` reports "File Not Found" with exit code 1
            (Self::WindowsDir, ExitStatus::NonZeroExit(1)) => true,
            _ => false,
        }
    }
}

/// Single-quote for a POSIX shell
fn posix_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(stdout: &str, status: ExitStatus) -> ExecutionResult {
        ExecutionResult {
            stdout: stdout.to_string(),
            stderr: String::new(),
            status,
        }
    }

    #[test]
    fn test_find_command_without_depth() {
        let command = SearchStrategy::PosixFind.command("*.rs", Path::new("/src"), None);
        assert_eq!(command, "find '/src' -type f -name '*.rs'");
    }

    #[test]
    fn test_find_command_with_depth() {
        let command = SearchStrategy::PosixFind.command("*.toml", Path::new("/repo"), Some(2));
        assert_eq!(command, "find '/repo' -maxdepth 2 -type f -name '*.toml'");
    }

    #[test]
    fn test_find_command_escapes_quotes() {
        let command = SearchStrategy::PosixFind.command("it's*", Path::new("/a b"), None);
        assert_eq!(command, r"find '/a b' -type f -name 'it'\''s*'");
    }

    #[test]
    fn test_dir_command_ignores_depth() {
        let command = SearchStrategy::WindowsDir.command("*.txt", Path::new("C:\\work"), Some(3));
        assert_eq!(command, "dir /s /b \"*.txt\"");
    }

    #[test]
    fn test_found_nothing() {
        let find = SearchStrategy::PosixFind;
        assert!(find.found_nothing(&result("", ExitStatus::Success)));
        assert!(find.found_nothing(&result("  \n", ExitStatus::Success)));
        assert!(!find.found_nothing(&result("/a/b.rs\n", ExitStatus::Success)));
        assert!(!find.found_nothing(&result("", ExitStatus::NonZeroExit(1))));

        let dir = SearchStrategy::WindowsDir;
        assert!(dir.found_nothing(&result("", ExitStatus::NonZeroExit(1))));
        assert!(!dir.found_nothing(&result("", ExitStatus::TimedOut)));
    }
}
