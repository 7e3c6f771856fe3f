//! [`RemoteConnection`] backed by the system `ssh` client.

use std::ffi::OsString;

use tracing::{debug, warn};

use crate::connection::ConnectionParams;
use crate::sync::{CommandRunner, SyncConfig, expand_tilde};

use super::{RemoteCommandOutput, RemoteConnection, RemoteError};

/// Exit status `ssh` reserves for its own failures (refused connection,
/// authentication, host key mismatch).
const SSH_CONNECTION_FAILURE: i32 = 255;

/// Runs remote commands by invoking `ssh` through a [`CommandRunner`].
#[derive(Clone, Debug)]
pub struct SshConnection<R: CommandRunner> {
    params: ConnectionParams,
    ssh_bin: String,
    batch_mode: bool,
    strict_host_keys: bool,
    runner: R,
}

impl<R: CommandRunner> SshConnection<R> {
    /// Creates a connection to the host in `params`, taking the `ssh` path
    /// and SSH defaults from `config`.
    #[must_use]
    pub fn new(config: &SyncConfig, params: ConnectionParams, runner: R) -> Self {
        Self {
            params,
            ssh_bin: config.ssh_bin.clone(),
            batch_mode: config.batch_mode(),
            strict_host_keys: config.strict_host_key_checking(),
            runner,
        }
    }

    /// Overrides host key checking for this connection.
    #[must_use]
    pub const fn with_strict_host_keys(mut self, strict_host_keys: bool) -> Self {
        self.strict_host_keys = strict_host_keys;
        self
    }

    /// Returns the connection parameters.
    #[must_use]
    pub const fn params(&self) -> &ConnectionParams {
        &self.params
    }

    pub(crate) fn build_ssh_args(&self, command: &str) -> Vec<OsString> {
        let mut args = vec![
            OsString::from("-p"),
            OsString::from(self.params.port.to_string()),
        ];

        for key in &self.params.key_files {
            args.push(OsString::from("-i"));
            args.push(OsString::from(expand_tilde(key)));
        }

        if self.batch_mode {
            args.push(OsString::from("-o"));
            args.push(OsString::from("BatchMode=yes"));
        }

        if !self.strict_host_keys {
            args.push(OsString::from("-o"));
            args.push(OsString::from("StrictHostKeyChecking=no"));
        }

        args.push(OsString::from(self.params.login()));
        args.push(OsString::from(command));
        args
    }
}

impl<R: CommandRunner> RemoteConnection for SshConnection<R> {
    fn run_command(&self, command: &str) -> Result<RemoteCommandOutput, RemoteError> {
        debug!(host = %self.params.host, %command, "running remote command");
        let args = self.build_ssh_args(command);
        let output = self.runner.run(&self.ssh_bin, &args)?;

        match output.code {
            Some(SSH_CONNECTION_FAILURE) => {
                warn!(host = %self.params.host, stderr = %output.stderr, "ssh connection failed");
                return Err(RemoteError::Connection {
                    message: connection_message(&output.stderr, "ssh exited with status 255"),
                });
            }
            None => {
                warn!(host = %self.params.host, "ssh terminated without an exit status");
                return Err(RemoteError::Connection {
                    message: connection_message(&output.stderr, "ssh terminated by signal"),
                });
            }
            Some(_) => {}
        }

        Ok(RemoteCommandOutput {
            exit_code: output.code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

fn connection_message(stderr: &str, fallback: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        fallback.to_owned()
    } else {
        trimmed.to_owned()
    }
}
