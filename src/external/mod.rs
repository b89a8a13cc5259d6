//! # External Tool Integration
//!
//! This module launches external security tools with a bounded wait. A
//! handler composes a [`CommandSpec`], hands it to a [`CommandRunner`] along
//! with a timeout, and always gets back exactly one [`ExecutionResult`]:
//! spawn failures, pipe failures and timeouts are folded into the result
//! instead of being raised.
//!
//! ## Features
//!
//! - Shell-interpreted execution (`sh -c`) of the composed command line
//! - Concurrent capture of stdout and stderr with lossy UTF-8 decoding
//! - Timeout followed by SIGTERM, a grace period, then SIGKILL of the whole
//!   process group
//! - Cleanup when the awaiting future is dropped mid-run
//! - Tool-specific command composition in the submodules
//!
//! ## Example
//!
//! ```rust,no_run
//! use security_mcp::external::{CommandRunner, CommandSpec, ShellRunner};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let runner = ShellRunner::new();
//!     let command = CommandSpec::new("echo").arg("hello");
//!     let result = runner.execute(&command, Duration::from_secs(5)).await;
//!
//!     assert_eq!(result.exit_code, 0);
//!     assert_eq!(result.stdout, "hello\n");
//! }
//! ```

pub mod custom;
pub mod dirb;
pub mod nikto;
pub mod nmap;
pub mod ping;
pub mod searchsploit;
pub mod sqlmap;
pub mod wpscan;

use crate::constants;
use crate::logging;
use async_trait::async_trait;
use std::fmt;
use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

/// Program name plus ordered argument tokens for one invocation.
///
/// Built with the consuming builder methods; there is no way to change a
/// command once it has been handed to a runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    secret_positions: Vec<usize>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            secret_positions: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds an argument that is masked in log output
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secret_positions.push(self.args.len());
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Single line handed to the shell; empty tokens are skipped
    pub fn to_shell_line(&self) -> String {
        self.tokens(false).join(" ")
    }

    /// Same as [`to_shell_line`](Self::to_shell_line) with secret arguments masked
    pub fn redacted_line(&self) -> String {
        self.tokens(true).join(" ")
    }

    fn tokens(&self, redact: bool) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().enumerate().map(|(i, arg)| {
                if redact && self.secret_positions.contains(&i) {
                    "***"
                } else {
                    arg.as_str()
                }
            }))
            .filter(|token| !token.is_empty())
            .collect()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted_line())
    }
}

/// Outcome of one executor call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl ExecutionResult {
    /// Result for a process that ran to completion
    pub fn completed(exit_code: i32, stdout: &[u8], stderr: &[u8]) -> Self {
        Self {
            exit_code,
            stdout: String::from_utf8_lossy(stdout).into_owned(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
            timed_out: false,
        }
    }

    /// Result for a process killed after exceeding `timeout`
    pub fn from_timeout(timeout: Duration) -> Self {
        Self {
            exit_code: -1,
            stdout: String::new(),
            stderr: format!(
                "Command timed out after {} seconds",
                timeout.as_secs_f64()
            ),
            timed_out: true,
        }
    }

    /// Result for a launch or pipe failure
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            exit_code: -1,
            stdout: String::new(),
            stderr: message.into(),
            timed_out: false,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0 && !self.timed_out
    }

    /// stdout immediately followed by stderr
    pub fn combined_output(&self) -> String {
        let mut output = String::with_capacity(self.stdout.len() + self.stderr.len());
        output.push_str(&self.stdout);
        output.push_str(&self.stderr);
        output
    }
}

/// A composed command together with the label and timeout its handler uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedScan {
    /// Target as shown in the response heading (after URL normalization)
    pub target: String,
    pub command: CommandSpec,
    pub timeout: Duration,
}

/// Runs a command with a deadline. Never fails; failures live in the result.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn execute(&self, command: &CommandSpec, timeout: Duration) -> ExecutionResult;
}

/// Bounded executor backed by `sh -c`
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    grace_period: Duration,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self {
            shell: constants::SHELL.to_string(),
            grace_period: Duration::from_secs(constants::TERMINATION_GRACE_SECS),
        }
    }
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Time a timed-out child gets between SIGTERM and SIGKILL
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    async fn run(&self, command: &CommandSpec, timeout: Duration) -> ExecutionResult {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c")
            .arg(command.to_shell_line())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                return ExecutionResult::failed(format!(
                    "Failed to launch {}: {}",
                    command.program(),
                    e
                ))
            }
        };

        let mut guard = ProcessGroupGuard::new(child.id());
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let outcome = tokio::time::timeout(timeout, collect_output(&mut child, stdout, stderr)).await;

        let result = match outcome {
            Ok(Ok((status, stdout, stderr))) => {
                ExecutionResult::completed(exit_code(status), &stdout, &stderr)
            }
            Ok(Err(e)) => {
                self.terminate(&mut child, guard.pid).await;
                ExecutionResult::failed(format!(
                    "Failed to communicate with {}: {}",
                    command.program(),
                    e
                ))
            }
            Err(_) => {
                self.terminate(&mut child, guard.pid).await;
                ExecutionResult::from_timeout(timeout)
            }
        };

        guard.disarm();
        result
    }

    /// SIGTERM, bounded wait, then SIGKILL. Every error here is swallowed.
    async fn terminate(&self, child: &mut Child, pid: Option<u32>) {
        signal_group(pid, GroupSignal::Terminate);
        if child.try_wait().ok().flatten().is_none()
            && tokio::time::timeout(self.grace_period, child.wait())
                .await
                .is_err()
        {
            tracing::warn!(pid = ?pid, "Child ignored termination request, killing");
            let _ = child.start_kill();
            let _ = child.wait().await;
        }
        signal_group(pid, GroupSignal::Kill);
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn execute(&self, command: &CommandSpec, timeout: Duration) -> ExecutionResult {
        let started = Instant::now();
        let result = self.run(command, timeout).await;
        logging::log_external_tool(
            command.program(),
            &command.redacted_line(),
            started.elapsed().as_millis() as u64,
            &result,
        );
        result
    }
}

async fn collect_output<O, E>(
    child: &mut Child,
    stdout: Option<O>,
    stderr: Option<E>,
) -> io::Result<(ExitStatus, Vec<u8>, Vec<u8>)>
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let (stdout, stderr, status) =
        tokio::try_join!(read_pipe(stdout), read_pipe(stderr), child.wait())?;
    Ok((status, stdout, stderr))
}

async fn read_pipe<R: AsyncRead + Unpin>(pipe: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}

#[derive(Debug, Clone, Copy)]
enum GroupSignal {
    Terminate,
    Kill,
}

#[cfg(unix)]
fn signal_group(pid: Option<u32>, signal: GroupSignal) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(pid) = pid else { return };
    let signal = match signal {
        GroupSignal::Terminate => Signal::SIGTERM,
        GroupSignal::Kill => Signal::SIGKILL,
    };
    // ESRCH once the group is gone
    let _ = killpg(Pid::from_raw(pid as i32), signal);
}

#[cfg(not(unix))]
fn signal_group(_pid: Option<u32>, _signal: GroupSignal) {}

/// Kills the child's process group if the run is abandoned before cleanup
struct ProcessGroupGuard {
    pid: Option<u32>,
    armed: bool,
}

impl ProcessGroupGuard {
    fn new(pid: Option<u32>) -> Self {
        Self { pid, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for ProcessGroupGuard {
    fn drop(&mut self) {
        if self.armed {
            signal_group(self.pid, GroupSignal::Kill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> ShellRunner {
        ShellRunner::new().with_grace_period(Duration::from_millis(500))
    }

    #[test]
    fn test_shell_line_skips_empty_tokens() {
        let spec = CommandSpec::new("nmap").arg("").arg("-F").arg("host");
        assert_eq!(spec.to_shell_line(), "nmap -F host");
        assert_eq!(spec.arguments().len(), 3);
    }

    #[test]
    fn test_secret_args_are_masked() {
        let spec = CommandSpec::new("wpscan")
            .args(["--url", "http://x"])
            .arg("--api-token")
            .secret_arg("abc123");
        assert_eq!(spec.to_shell_line(), "wpscan --url http://x --api-token abc123");
        assert_eq!(spec.redacted_line(), "wpscan --url http://x --api-token ***");
        assert_eq!(spec.to_string(), spec.redacted_line());
    }

    #[test]
    fn test_timed_out_message() {
        let result = ExecutionResult::from_timeout(Duration::from_secs(300));
        assert_eq!(result.stderr, "Command timed out after 300 seconds");
        assert_eq!(result.exit_code, -1);
        assert!(result.stdout.is_empty());
        assert!(result.timed_out);

        let result = ExecutionResult::from_timeout(Duration::from_millis(200));
        assert_eq!(result.stderr, "Command timed out after 0.2 seconds");
    }

    #[test]
    fn test_combined_output_order() {
        let result = ExecutionResult::completed(3, b"out\n", b"err\n");
        assert_eq!(result.combined_output(), "out\nerr\n");
        assert!(!result.success());
    }

    #[tokio::test]
    async fn test_execute_captures_stdout_and_exit_code() {
        let spec = CommandSpec::new("printf").arg("'hello world'");
        let result = runner().execute(&spec, Duration::from_secs(5)).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "hello world");
        assert!(result.stderr.is_empty());
        assert!(!result.timed_out);
    }

    #[tokio::test]
    async fn test_execute_reports_nonzero_exit() {
        let spec = CommandSpec::new("echo").args(["oops", ">&2", ";", "exit", "7"]);
        let result = runner().execute(&spec, Duration::from_secs(5)).await;
        assert_eq!(result.exit_code, 7);
        assert_eq!(result.stderr, "oops\n");
        assert!(!result.timed_out);
    }

    #[tokio::test]
    async fn test_execute_replaces_invalid_utf8() {
        let spec = CommandSpec::new("printf").arg("'\\377ok'");
        let result = runner().execute(&spec, Duration::from_secs(5)).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "\u{FFFD}ok");
    }

    #[tokio::test]
    async fn test_execute_times_out() {
        let spec = CommandSpec::new("echo").args(["partial", ";", "sleep", "10"]);
        let started = Instant::now();
        let result = runner().execute(&spec, Duration::from_millis(300)).await;
        assert!(result.timed_out);
        assert_eq!(result.exit_code, -1);
        assert!(result.stdout.is_empty());
        assert_eq!(result.stderr, "Command timed out after 0.3 seconds");
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_launch_failure_is_a_result() {
        let runner = ShellRunner::new().with_shell("/definitely/not/a/shell");
        let result = runner
            .execute(&CommandSpec::new("true"), Duration::from_secs(5))
            .await;
        assert_eq!(result.exit_code, -1);
        assert!(!result.timed_out);
        assert!(result.stdout.is_empty());
        assert!(result.stderr.starts_with("Failed to launch true"));
    }

    #[tokio::test]
    async fn test_missing_program_reports_shell_status() {
        let spec = CommandSpec::new("definitely_not_a_real_command_12345");
        let result = runner().execute(&spec, Duration::from_secs(5)).await;
        assert_eq!(result.exit_code, 127);
        assert!(!result.stderr.is_empty());
    }
}
