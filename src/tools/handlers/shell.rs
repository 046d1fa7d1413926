//! Shell command tool with a wall-clock timeout.

use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use serde::Deserialize;
use serde_json::Value;

use crate::tools::context::ToolContext;
use crate::tools::definition::{ToolDefinition, ToolParam};
use crate::tools::error::ToolError;

use super::parse_args;

/// How often the child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How long to wait for output pipes to close after the child exits.
const DRAIN_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Deserialize)]
struct ExecuteCommandArgs {
    command: String,
    #[serde(default = "default_working_dir")]
    working_dir: String,
}

fn default_working_dir() -> String {
    ".".to_string()
}

/// Create the execute_command tool definition.
#[must_use]
pub fn execute_command_tool() -> ToolDefinition {
    ToolDefinition {
        name: "execute_command",
        description: "Execute a shell command and return its output.",
        params: vec![
            ToolParam::string("command", "Command to execute."),
            ToolParam::string("working_dir", "Working directory for the command.").with_default("."),
        ],
        required: vec!["command"],
        executor: Arc::new(execute_command),
    }
}

fn execute_command(ctx: &ToolContext, args: Value) -> Result<String, ToolError> {
    let args: ExecuteCommandArgs = parse_args(args)?;
    let workdir = ctx.resolve(&args.working_dir);

    let mut cmd = shell_command(&args.command);
    cmd.current_dir(&workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let output = run_with_timeout(cmd, &args.command, ctx.command_timeout)?;
    if output.status.success() {
        return Ok(format!("Command succeeded:\n{}", output.stdout));
    }
    Err(ToolError::CommandFailed {
        code: output.status.code(),
        stdout: output.stdout,
        stderr: output.stderr,
    })
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

struct CommandOutput {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

fn run_with_timeout(
    mut cmd: Command,
    command: &str,
    timeout: Duration,
) -> Result<CommandOutput, ToolError> {
    let mut child = cmd
        .spawn()
        .map_err(|e| ToolError::io("run command", command, e))?;

    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    log::debug!("command timed out after {timeout:?}: {command}");
                    return Err(ToolError::Timeout(timeout.as_millis() as u64));
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(ToolError::Execution(format!("wait failed: {e}"))),
        }
    };

    Ok(CommandOutput {
        status,
        stdout: collect(stdout),
        stderr: collect(stderr),
    })
}

/// Read a pipe to the end on its own thread so a chatty child never blocks
/// on a full pipe buffer.
fn drain<R: Read + Send + 'static>(mut pipe: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(buf);
    });
    rx
}

/// A background grandchild can keep the pipe open after the shell exits;
/// give up on it after a short grace period.
fn collect(rx: Option<Receiver<Vec<u8>>>) -> String {
    rx.and_then(|rx| rx.recv_timeout(DRAIN_GRACE).ok())
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}
