//! Test support utilities shared across unit and integration tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::rc::Rc;

use crate::remote::{RemoteCommandOutput, RemoteConnection, RemoteError};
use crate::sync::{CommandOutput, CommandRunner, SyncError};

/// Scripted command runner that returns pre-seeded outputs in FIFO order.
///
/// Used to drive deterministic command outcomes without spawning processes.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRunner {
    responses: Rc<RefCell<VecDeque<CommandOutput>>>,
    invocations: Rc<RefCell<Vec<CommandInvocation>>>,
}

/// Records a single invocation made through [`ScriptedRunner`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandInvocation {
    /// Program name as passed to the runner.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<OsString>,
}

impl CommandInvocation {
    /// Returns a shell-like command string for assertions.
    #[must_use]
    pub fn command_string(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.clone());
        parts.extend(
            self.args
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned()),
        );
        parts.join(" ")
    }

    /// Returns the script passed to a shell as `<shell> -c <script>`.
    #[must_use]
    pub fn shell_script(&self) -> Option<String> {
        match self.args.as_slice() {
            [flag, script] if flag == "-c" => Some(script.to_string_lossy().into_owned()),
            _ => None,
        }
    }
}

impl ScriptedRunner {
    /// Creates a new runner with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all invocations recorded so far.
    #[must_use]
    pub fn invocations(&self) -> Vec<CommandInvocation> {
        self.invocations.borrow().clone()
    }

    /// Pushes a successful exit status.
    pub fn push_success(&self) {
        self.push_output(Some(0), "", "");
    }

    /// Pushes a specific exit code.
    pub fn push_exit_code(&self, code: i32) {
        self.push_output(Some(code), "", "");
    }

    /// Pushes a failing exit code with stderr text.
    pub fn push_failure(&self, code: i32) {
        self.push_output(Some(code), "", "simulated failure");
    }

    /// Pushes a response with no exit code to simulate abnormal termination.
    pub fn push_missing_exit_code(&self) {
        self.push_output(None, "", "");
    }

    /// Pushes an explicit command output response.
    pub fn push_output(
        &self,
        code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) {
        self.responses.borrow_mut().push_back(CommandOutput {
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        });
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, SyncError> {
        self.invocations.borrow_mut().push(CommandInvocation {
            program: program.to_owned(),
            args: args.to_vec(),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| SyncError::Spawn {
                program: program.to_owned(),
                message: String::from("no scripted response available"),
            })
    }
}

/// Reply queued on a [`ScriptedConnection`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScriptedReply {
    /// The remote command ran and produced this output.
    Output(RemoteCommandOutput),
    /// The connection failed with this message.
    ConnectionLost(String),
}

/// Remote connection double that replays scripted stdout and records the
/// commands it receives.
#[derive(Clone, Debug, Default)]
pub struct ScriptedConnection {
    responses: Rc<RefCell<VecDeque<ScriptedReply>>>,
    commands: Rc<RefCell<Vec<String>>>,
}

impl ScriptedConnection {
    /// Creates a connection with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response carrying `stdout`.
    pub fn push_stdout(&self, stdout: impl Into<String>) {
        self.responses
            .borrow_mut()
            .push_back(ScriptedReply::Output(RemoteCommandOutput {
                exit_code: Some(0),
                stdout: stdout.into(),
                stderr: String::new(),
            }));
    }

    /// Queues a connection failure.
    pub fn push_error(&self, message: impl Into<String>) {
        self.responses
            .borrow_mut()
            .push_back(ScriptedReply::ConnectionLost(message.into()));
    }

    /// Returns the commands received so far.
    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl RemoteConnection for ScriptedConnection {
    fn run_command(&self, command: &str) -> Result<RemoteCommandOutput, RemoteError> {
        self.commands.borrow_mut().push(command.to_owned());
        match self.responses.borrow_mut().pop_front() {
            Some(ScriptedReply::Output(output)) => Ok(output),
            Some(ScriptedReply::ConnectionLost(message)) => {
                Err(RemoteError::Connection { message })
            }
            None => Err(RemoteError::Connection {
                message: String::from("no scripted response available"),
            }),
        }
    }
}
