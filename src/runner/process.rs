// Command runner implementation

use crate::runner::config::RunnerConfig;
use crate::runner::types::{ExecutionResult, ExecutionSpec, ExitStatus};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Spawns shell commands under a timeout
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    config: RunnerConfig,
}

impl CommandRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Run `spec.command` through the host shell and collect its output.
    ///
    /// Never fails: spawn errors, non-zero exits and timeouts are all
    /// reported through [`ExitStatus`].
    pub async fn spawn(&self, spec: &ExecutionSpec) -> ExecutionResult {
        let start = Instant::now();

        let mut command = Command::new(&self.config.shell);
        command
            .arg(&self.config.shell_flag)
            .arg(&spec.command)
            .current_dir(&spec.working_dir)
            .stdin(if spec.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Own process group so a timeout can take down everything the shell forked
        #[cfg(unix)]
        command.process_group(0);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(
                    shell = %self.config.shell,
                    cwd = %spec.working_dir.display(),
                    error = %e,
                    "failed to spawn shell"
                );
                return ExecutionResult::spawn_failed(e.to_string());
            }
        };

        debug!(pid = ?child.id(), cwd = %spec.working_dir.display(), "spawned shell");

        let stdout = Capture::start(child.stdout.take());
        let stderr = Capture::start(child.stderr.take());
        let feeder = feed_stdin(&mut child, spec.stdin.as_deref());

        let waited = timeout(spec.timeout, child.wait()).await;
        let status = match waited {
            Ok(Ok(status)) => match status.code() {
                Some(0) => ExitStatus::Success,
                Some(code) => ExitStatus::NonZeroExit(code),
                None => ExitStatus::NonZeroExit(-1),
            },
            Ok(Err(e)) => {
                warn!(error = %e, "failed to wait for shell");
                terminate(&mut child).await;
                ExitStatus::SpawnFailed(format!("failed to wait for process: {e}"))
            }
            Err(_) => {
                warn!(
                    timeout_ms = spec.timeout.as_millis() as u64,
                    "command timed out, killing process group"
                );
                terminate(&mut child).await;
                ExitStatus::TimedOut
            }
        };

        if let Some(feeder) = feeder {
            feeder.abort();
        }

        let stdout = stdout.finish(self.config.drain_grace).await;
        let stderr = stderr.finish(self.config.drain_grace).await;

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            status = ?status,
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            "shell command finished"
        );

        ExecutionResult {
            stdout,
            stderr,
            status,
        }
    }
}

/// Write the input on a separate task so a child that never reads cannot
/// stall the timeout. Dropping the pipe afterwards delivers EOF.
fn feed_stdin(child: &mut Child, input: Option<&str>) -> Option<JoinHandle<()>> {
    let input = input?.to_owned();
    let mut pipe = child.stdin.take()?;
    Some(tokio::spawn(async move {
        if let Err(e) = pipe.write_all(input.as_bytes()).await {
            // The child may exit without consuming its input
            debug!(error = %e, "stdin write interrupted");
            return;
        }
        if let Err(e) = pipe.shutdown().await {
            debug!(error = %e, "stdin close failed");
        }
    }))
}

async fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Some(pid) = child.id() {
            // SAFETY: kill(2) with a negative pid signals the group created at spawn
            let rc = unsafe { libc::kill(-(pid as libc::pid_t), libc::SIGKILL) };
            if rc != 0 {
                debug!(pid, error = %std::io::Error::last_os_error(), "process group kill failed");
            }
        }
    }

    if let Err(e) = child.kill().await {
        warn!(error = %e, "failed to kill shell");
    }
}

/// Background reader that keeps everything read so far, even if the
/// stream never reaches EOF.
struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
    task: Option<JoinHandle<()>>,
}

impl Capture {
    fn start<R>(pipe: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let task = pipe.map(|mut pipe| {
            let buf = Arc::clone(&buf);
            tokio::spawn(async move {
                let mut chunk = vec![0u8; 8 * 1024];
                loop {
                    match pipe.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => buf
                            .lock()
                            .unwrap_or_else(|e| e.into_inner())
                            .extend_from_slice(&chunk[..n]),
                    }
                }
            })
        });
        Self { buf, task }
    }

    async fn finish(self, grace: Duration) -> String {
        if let Some(mut task) = self.task {
            if timeout(grace, &mut task).await.is_err() {
                // A grandchild still holds the pipe open
                task.abort();
            }
        }
        let bytes = std::mem::take(&mut *self.buf.lock().unwrap_or_else(|e| e.into_inner()));
        String::from_utf8_lossy(&bytes).into_owned()
    }
}
