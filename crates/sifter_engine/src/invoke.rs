use std::process::Stdio;
use std::time::Duration;

use sifter_logging::engine_debug;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::{FailureKind, InvocationRequest, LaunchPlan, OutputContract, ParseError, ProcessOutcome};

#[derive(Debug, Clone)]
pub struct InvokerSettings {
    /// Bounded wait for the engine process; the child is killed on expiry.
    pub timeout: Duration,
}

impl Default for InvokerSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
        }
    }
}

/// Launches exactly one engine process per invocation and settles exactly
/// once. Cancellation mid-invocation is not supported; a hung engine is only
/// bounded by the timeout.
#[async_trait::async_trait]
pub trait EngineInvoker: Send + Sync {
    async fn invoke(
        &self,
        request: &InvocationRequest,
        contract: &OutputContract,
    ) -> Result<ProcessOutcome, ParseError>;
}

/// Production invoker: spawns the resolved engine with
/// `[source, --output <path>, --format <csv|json>]`, draining each diagnostic
/// stream in its own task so the caller never blocks on intermediate output.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    plan: LaunchPlan,
    settings: InvokerSettings,
}

impl ProcessInvoker {
    pub fn new(plan: LaunchPlan, settings: InvokerSettings) -> Self {
        Self { plan, settings }
    }
}

#[async_trait::async_trait]
impl EngineInvoker for ProcessInvoker {
    async fn invoke(
        &self,
        request: &InvocationRequest,
        contract: &OutputContract,
    ) -> Result<ProcessOutcome, ParseError> {
        let mut command = Command::new(&self.plan.program);
        command
            .args(&self.plan.prelude_args)
            .arg(&request.source_path)
            .arg("--output")
            .arg(&contract.path)
            .arg("--format")
            .arg(request.format.as_arg())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        engine_debug!(
            "Spawning engine {:?} for {:?}",
            self.plan.program,
            request.source_path
        );

        let mut child = command.spawn().map_err(|err| {
            ParseError::new(
                FailureKind::Launch,
                format!("Failed to start parser: {err}"),
                String::new(),
            )
        })?;

        // Each stream is accumulated append-only by its own task; order within
        // a stream is preserved, cross-stream interleaving is not.
        let stdout_task = tokio::spawn(drain(child.stdout.take()));
        let stderr_task = tokio::spawn(drain(child.stderr.take()));

        let status = match tokio::time::timeout(self.settings.timeout, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(err)) => {
                return Err(ParseError::new(
                    FailureKind::Launch,
                    format!("Failed to observe parser: {err}"),
                    String::new(),
                ));
            }
            Err(_elapsed) => {
                let _ = child.start_kill();
                return Err(ParseError::new(
                    FailureKind::Timeout,
                    format!(
                        "Parser exceeded the {}s limit and was killed",
                        self.settings.timeout.as_secs()
                    ),
                    String::new(),
                ));
            }
        };

        let stdout = stdout_task.await.unwrap_or_default();
        let stderr = stderr_task.await.unwrap_or_default();
        classify_exit(status.code().unwrap_or(-1), stdout, stderr)
    }
}

async fn drain<R>(pipe: Option<R>) -> String
where
    R: tokio::io::AsyncRead + Unpin,
{
    let Some(mut pipe) = pipe else {
        return String::new();
    };
    let mut bytes = Vec::new();
    let _ = pipe.read_to_end(&mut bytes).await;
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Classifies a terminated engine process: exit 0 carries the accumulated
/// buffers forward for materialization; nonzero is an execution failure whose
/// diagnostic log prefers stderr and falls back to stdout.
pub fn classify_exit(
    exit_code: i32,
    stdout: String,
    stderr: String,
) -> Result<ProcessOutcome, ParseError> {
    if exit_code == 0 {
        return Ok(ProcessOutcome {
            exit_code,
            stdout,
            stderr,
        });
    }
    let diagnostic_log = if stderr.is_empty() { stdout } else { stderr };
    Err(ParseError::new(
        FailureKind::Execution { exit_code },
        format!("Parser failed with code {exit_code}"),
        diagnostic_log,
    ))
}

#[cfg(test)]
mod tests {
    use super::classify_exit;
    use crate::FailureKind;

    #[test]
    fn zero_exit_carries_both_buffers() {
        let outcome = classify_exit(0, "out".into(), "err".into()).unwrap();
        assert_eq!(outcome.stdout, "out");
        assert_eq!(outcome.stderr, "err");
    }

    #[test]
    fn nonzero_exit_prefers_stderr() {
        let err = classify_exit(2, "stdout noise".into(), "bad input".into()).unwrap_err();
        assert_eq!(err.kind, FailureKind::Execution { exit_code: 2 });
        assert!(err.message.contains("code 2"));
        assert_eq!(err.diagnostic_log, "bad input");
    }

    #[test]
    fn nonzero_exit_falls_back_to_stdout() {
        let err = classify_exit(1, "only stdout".into(), String::new()).unwrap_err();
        assert_eq!(err.diagnostic_log, "only stdout");
    }
}
