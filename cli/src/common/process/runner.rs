//! # Command Runner (`common::process::runner`)
//!
//! File: cli/src/common/process/runner.rs
//!
//! ## Overview
//!
//! `CommandRunner` turns a raw command string into a bounded child process:
//!
//! 1. Parse the string into leading assignments and an invocation (`parse`).
//! 2. Spawn the program in its own process group with an environment built
//!    from an explicit base snapshot followed by the assignments.
//! 3. Capture stdout and stderr as one stream (`capture`).
//! 4. Enforce a wall-clock deadline measured from spawn. On expiry the whole
//!    group is killed before `Timeout` is returned.
//!
//! The runner holds no mutable state, so concurrent `run` calls are
//! independent: each gets its own child, pipe and timer. Nothing is retried.
//!
//! ## Examples
//!
//! ```rust
//! let runner = CommandRunner::new();
//! let output = runner.run("LIVEKIT_URL=ws://localhost:7880 lk room list").await?;
//! ```
//!
use super::capture::{Capture, Drain};
use super::parse::{parse, ParsedCommand};
use crate::core::error::{RunError, RunFailure};
use command_group::{AsyncCommandGroup, AsyncGroupChild};
use std::ffi::OsString;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, info, warn};

/// Hard ceiling on a single run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// How long to keep reading after a kill before giving up on the stream.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Environment a child starts from, before assignments are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseEnv {
    vars: Vec<(OsString, OsString)>,
}

impl BaseEnv {
    /// Snapshot of the current process environment.
    pub fn inherit() -> Self {
        Self::from_pairs(std::env::vars_os())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsString, &OsString)> {
        self.vars.iter().map(|(k, v)| (k, v))
    }
}

/// Parses and runs command strings with a bounded lifetime.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    base_env: BaseEnv,
    timeout: Duration,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner {
    /// Runner that inherits the current environment and uses `DEFAULT_TIMEOUT`.
    pub fn new() -> Self {
        Self {
            base_env: BaseEnv::inherit(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[allow(dead_code)]
    pub fn with_base_env(mut self, base_env: BaseEnv) -> Self {
        self.base_env = base_env;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Parses `cmd` and runs it, returning the combined output.
    ///
    /// On failure the returned `RunFailure` carries whatever output was
    /// captured: empty for parse and launch failures, partial for a timeout,
    /// complete for a non-zero exit.
    pub async fn run(&self, cmd: &str) -> Result<Vec<u8>, RunFailure> {
        info!("Received command: {:?}", cmd);

        let parsed = parse(cmd).map_err(|e| {
            debug!(kind = e.kind(), "Command rejected before spawn");
            RunFailure::from(e)
        })?;

        debug!("Environment assignments: {:?}", parsed.env_map());
        debug!("Invocation: {:?}", parsed.invocation());

        self.execute(&parsed).await
    }

    /// Runs an already parsed command.
    pub async fn execute(&self, parsed: &ParsedCommand) -> Result<Vec<u8>, RunFailure> {
        let launch_failed = |source: std::io::Error| {
            RunFailure::from(RunError::LaunchFailed {
                program: parsed.program.clone(),
                source,
            })
        };

        info!("Executing command: {} {:?}", parsed.program, parsed.args);

        // `command` drops at the end of this block, closing the parent's write ends.
        let (mut child, mut drain) = {
            let mut command = self.build_command(parsed);
            let capture = Capture::attach(&mut command).map_err(launch_failed)?;
            let mut child = command.group_spawn().map_err(launch_failed)?;
            match capture.start(&mut child) {
                Ok(drain) => (child, drain),
                Err(e) => {
                    kill_group(&mut child).await;
                    return Err(launch_failed(e));
                }
            }
        };

        let deadline = Instant::now() + self.timeout;

        let status = match timeout_at(deadline, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                kill_group(&mut child).await;
                return Err(RunFailure::new(
                    RunError::ExecutionFailed {
                        reason: e.to_string(),
                    },
                    drain.into_output(),
                ));
            }
            Err(_) => return Err(self.expire(&mut child, drain).await),
        };

        // Descendants may still hold the stream open after the child exits.
        match timeout_at(deadline, drain.finish()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Output stream closed with error: {}", e),
            Err(_) => return Err(self.expire(&mut child, drain).await),
        }
        let output = drain.into_output();

        info!(
            "Command finished with {}, output length: {}",
            status,
            output.len()
        );
        debug!("Command output: {:?}", String::from_utf8_lossy(&output));

        if status.success() {
            Ok(output)
        } else {
            Err(RunFailure::new(
                RunError::ExecutionFailed {
                    reason: status.to_string(),
                },
                output,
            ))
        }
    }

    fn build_command(&self, parsed: &ParsedCommand) -> Command {
        let mut command = Command::new(&parsed.program);
        command
            .args(&parsed.args)
            .env_clear()
            .envs(self.base_env.iter())
            .envs(parsed.env.iter().map(|a| (&a.name, &a.value)))
            .stdin(Stdio::null())
            .kill_on_drop(true);
        command
    }

    async fn expire(&self, child: &mut AsyncGroupChild, mut drain: Drain) -> RunFailure {
        warn!(
            "Command exceeded its {:?} deadline, killing process group",
            self.timeout
        );
        kill_group(child).await;
        if timeout(DRAIN_GRACE, drain.finish()).await.is_err() {
            warn!("Output stream still open {:?} after kill", DRAIN_GRACE);
        }
        let failure = RunFailure::new(
            RunError::Timeout {
                timeout: self.timeout,
            },
            drain.into_output(),
        );
        debug!("Output captured before kill: {:?}", failure.output_lossy());
        failure
    }
}

async fn kill_group(child: &mut AsyncGroupChild) {
    if let Err(e) = child.kill().await {
        debug!("Process group kill returned: {}", e);
    }
}

// --- Unit Tests ---
#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn test_env() -> BaseEnv {
        BaseEnv::from_pairs([
            ("PATH", std::env::var_os("PATH").unwrap_or_default()),
            ("BASE_ONLY", OsString::from("from-base")),
            ("SHADOWED", OsString::from("base")),
        ])
    }

    fn runner() -> CommandRunner {
        CommandRunner::new().with_base_env(test_env())
    }

    /// Writes a script and returns a command string that runs it through `sh`.
    fn script_command(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, format!("{}\n", body)).unwrap();
        format!("sh {}", path.display())
    }

    #[tokio::test]
    async fn test_blank_input_fails_without_output() {
        for input in ["", "    ", "\t"] {
            let failure = runner().run(input).await.unwrap_err();
            assert!(matches!(failure.error, RunError::EmptyCommand));
            assert!(failure.output.is_empty());
        }
    }

    #[tokio::test]
    async fn test_assignments_reach_the_child() {
        let output = runner().run("FOO=1 BAR=2 echo hi").await.unwrap();
        assert_eq!(output, b"hi\n");

        let output = runner().run("FOO=1 BAR=2 printenv BAR").await.unwrap();
        assert_eq!(output, b"2\n");
    }

    #[tokio::test]
    async fn test_assignments_override_base_env() {
        let output = runner().run("SHADOWED=override printenv SHADOWED").await.unwrap();
        assert_eq!(output, b"override\n");

        let output = runner().run("X=1 X=2 printenv X").await.unwrap();
        assert_eq!(output, b"2\n");
    }

    #[tokio::test]
    async fn test_child_sees_only_the_base_snapshot() {
        let output = runner().run("printenv BASE_ONLY").await.unwrap();
        assert_eq!(output, b"from-base\n");

        // Not in the synthetic base, so printenv exits 1.
        let failure = runner()
            .run("printenv CMDBRIDGE_SURELY_UNSET")
            .await
            .unwrap_err();
        assert!(matches!(failure.error, RunError::ExecutionFailed { .. }));
    }

    #[tokio::test]
    async fn test_late_assignment_is_an_argument() {
        let output = runner().run("echo FOO=1").await.unwrap();
        assert_eq!(output, b"FOO=1\n");
    }

    #[tokio::test]
    async fn test_dash_program_fails_to_launch() {
        let failure = runner().run("FOO=1 -x=2 echo hi").await.unwrap_err();
        match &failure.error {
            RunError::LaunchFailed { program, .. } => assert_eq!(program, "-x=2"),
            other => panic!("expected LaunchFailed, got {:?}", other),
        }
        assert!(failure.output.is_empty());
    }

    #[tokio::test]
    async fn test_missing_program_fails_to_launch() {
        let failure = runner()
            .run("cmdbridge-no-such-program-42 --help")
            .await
            .unwrap_err();
        assert!(matches!(failure.error, RunError::LaunchFailed { .. }));
    }

    #[tokio::test]
    async fn test_only_assignments_is_no_command() {
        let failure = runner().run("FOO=1").await.unwrap_err();
        assert!(matches!(failure.error, RunError::NoCommandFound));
    }

    #[tokio::test]
    async fn test_zero_exit_is_success() {
        assert!(runner().run("true").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_zero_exit_keeps_output() {
        let dir = TempDir::new().unwrap();
        let script = script_command(
            dir.path(),
            "fail.sh",
            "echo partial\necho oops >&2\nexit 1",
        );

        let failure = runner().run(&script).await.unwrap_err();
        match &failure.error {
            RunError::ExecutionFailed { reason } => assert!(reason.contains('1')),
            other => panic!("expected ExecutionFailed, got {:?}", other),
        }
        assert_eq!(failure.output_lossy(), "partial\noops\n");
    }

    #[tokio::test]
    async fn test_output_keeps_emission_order() {
        let dir = TempDir::new().unwrap();
        let script = script_command(
            dir.path(),
            "mixed.sh",
            "echo out-1\necho err-1 >&2\necho out-2\necho err-2 >&2",
        );

        let output = runner().run(&script).await.unwrap();
        assert_eq!(output, b"out-1\nerr-1\nout-2\nerr-2\n");
    }

    #[tokio::test]
    async fn test_deadline_kills_long_running_program() {
        let started = std::time::Instant::now();
        let failure = runner()
            .with_timeout(Duration::from_millis(200))
            .run("sleep 30")
            .await
            .unwrap_err();

        assert!(matches!(failure.error, RunError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_deadline_kills_the_whole_group() {
        let dir = TempDir::new().unwrap();
        let script = script_command(dir.path(), "tree.sh", "sleep 30 &\necho started\nwait");

        let started = std::time::Instant::now();
        let failure = runner()
            .with_timeout(Duration::from_millis(500))
            .run(&script)
            .await
            .unwrap_err();

        assert!(matches!(failure.error, RunError::Timeout { .. }));
        assert_eq!(failure.output_lossy(), "started\n");
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_concurrent_runs_are_independent() {
        let runner = runner();
        let (a, b) = tokio::join!(
            runner.run("A=first printenv A"),
            runner.run("A=second printenv A")
        );
        assert_eq!(a.unwrap(), b"first\n");
        assert_eq!(b.unwrap(), b"second\n");
    }

    #[tokio::test]
    async fn test_repeated_runs_classify_the_same() {
        let runner = runner();
        for _ in 0..3 {
            assert_eq!(runner.run("echo same").await.unwrap(), b"same\n");
            assert!(matches!(
                runner.run("FOO=1").await.unwrap_err().error,
                RunError::NoCommandFound
            ));
        }
    }

    #[test]
    fn test_default_timeout_is_five_minutes() {
        assert_eq!(CommandRunner::new().timeout(), Duration::from_secs(300));
        assert_eq!(DEFAULT_TIMEOUT.as_secs(), 300);
    }

    #[test]
    fn test_inherited_env_snapshot_matches_process() {
        let base = BaseEnv::inherit();
        assert_eq!(base.iter().count(), std::env::vars_os().count());
    }
}
