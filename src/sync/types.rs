//! Core sync types and command runner abstraction.

use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use shell_escape::unix::escape;
use tracing::debug;

use crate::sync::SyncError;

/// Result of running an external command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandOutput {
    /// Exit code reported by the process, if available.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Returns `true` when the exit code equals zero.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Abstraction over command execution to support fakes in tests.
pub trait CommandRunner {
    /// Runs `program` with the given arguments, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Spawn`] if the command cannot be started.
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, SyncError>;
}

/// Real command runner that shells out to the host operating system.
#[derive(Clone, Debug, Default)]
pub struct ProcessCommandRunner;

impl CommandRunner for ProcessCommandRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, SyncError> {
        debug!(command = %render_invocation(program, args), "spawning process");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|err| spawn_error(program, &err))?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Command runner that forwards child output to this process while also
/// capturing it, so long transfers show progress as they happen.
#[derive(Clone, Debug, Default)]
pub struct StreamingCommandRunner;

impl CommandRunner for StreamingCommandRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, SyncError> {
        debug!(command = %render_invocation(program, args), "spawning streaming process");
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| spawn_error(program, &err))?;

        let stdout_reader = child
            .stdout
            .take()
            .map(|pipe| thread::spawn(move || tee(pipe, io::stdout())));
        let stderr_reader = child
            .stderr
            .take()
            .map(|pipe| thread::spawn(move || tee(pipe, io::stderr())));

        let status = child.wait().map_err(|err| spawn_error(program, &err))?;
        let stdout = collect(stdout_reader, program)?;
        let stderr = collect(stderr_reader, program)?;

        Ok(CommandOutput {
            code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }
}

fn tee(mut source: impl Read, mut sink: impl Write) -> io::Result<Vec<u8>> {
    let mut captured = Vec::new();
    let mut buffer = [0_u8; 8192];
    loop {
        let read = source.read(&mut buffer)?;
        if read == 0 {
            return Ok(captured);
        }
        let chunk = buffer.get(..read).unwrap_or_default();
        sink.write_all(chunk)?;
        sink.flush()?;
        captured.extend_from_slice(chunk);
    }
}

fn collect(
    reader: Option<JoinHandle<io::Result<Vec<u8>>>>,
    program: &str,
) -> Result<Vec<u8>, SyncError> {
    let Some(handle) = reader else {
        return Ok(Vec::new());
    };
    match handle.join() {
        Ok(result) => result.map_err(|err| spawn_error(program, &err)),
        Err(_) => Err(SyncError::Spawn {
            program: program.to_owned(),
            message: String::from("output forwarding thread panicked"),
        }),
    }
}

fn spawn_error(program: &str, err: &io::Error) -> SyncError {
    SyncError::Spawn {
        program: program.to_owned(),
        message: err.to_string(),
    }
}

/// Renders `program` and `args` as a single shell-escaped line for logs.
#[must_use]
pub fn render_invocation(program: &str, args: &[OsString]) -> String {
    let mut rendered = escape(program.into()).into_owned();
    for arg in args {
        let lossy = arg.to_string_lossy();
        rendered.push(' ');
        rendered.push_str(escape(lossy).as_ref());
    }
    rendered
}
