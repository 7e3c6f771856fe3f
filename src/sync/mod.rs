//! rsync synchronisation between a local path and a remote host.
//!
//! [`Syncer`] turns connection parameters and [`SyncOptions`] into a single
//! shell command line for the system `rsync`, then hands it to a
//! [`CommandRunner`] through the configured shell. The builder never touches
//! the filesystem itself.

use std::ffi::OsString;

use camino::Utf8Path;
use tracing::{debug, warn};

use crate::connection::ConnectionParams;

pub mod command;
mod config;
mod options;
mod types;
mod util;

pub use command::{DISABLE_HOST_KEY_CHECKING, build_rsync_command};
pub use config::{SyncConfig, SyncConfigLoadError, SyncError};
pub use options::{Direction, SyncOptions};
pub use types::{
    CommandOutput, CommandRunner, ProcessCommandRunner, StreamingCommandRunner, render_invocation,
};
pub use util::expand_tilde;

/// Builds and runs rsync command lines.
#[derive(Clone, Debug)]
pub struct Syncer<R: CommandRunner> {
    config: SyncConfig,
    runner: R,
}

impl Syncer<ProcessCommandRunner> {
    /// Convenience constructor that wires the real process runner.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] when validation fails.
    pub fn with_process_runner(config: SyncConfig) -> Result<Self, SyncError> {
        Self::new(config, ProcessCommandRunner)
    }
}

impl<R: CommandRunner> Syncer<R> {
    /// Creates a new syncer using the provided runner and configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] when configuration validation
    /// fails.
    pub fn new(config: SyncConfig, runner: R) -> Result<Self, SyncError> {
        config.validate()?;
        Ok(Self { config, runner })
    }

    /// Returns a reference to the underlying configuration.
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns the rsync command line [`Syncer::sync`] would run.
    #[must_use]
    pub fn build_command(
        &self,
        connection: &ConnectionParams,
        local_path: &Utf8Path,
        remote_path: &Utf8Path,
        options: &SyncOptions,
    ) -> String {
        build_rsync_command(
            &self.config.rsync_bin,
            connection,
            local_path,
            remote_path,
            options,
        )
    }

    /// Runs rsync between `local_path` and `remote_path` on the connection's
    /// host, in the direction given by `options`.
    ///
    /// `local_path` is passed through verbatim, so a trailing slash copies
    /// the directory's contents rather than the directory itself.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Spawn`] when the shell cannot be started, or
    /// [`SyncError::CommandFailure`] if `rsync` returns a non-zero exit code.
    pub fn sync(
        &self,
        connection: &ConnectionParams,
        local_path: &Utf8Path,
        remote_path: &Utf8Path,
        options: &SyncOptions,
    ) -> Result<CommandOutput, SyncError> {
        let command = self.build_command(connection, local_path, remote_path, options);
        debug!(%command, host = %connection.host, "running rsync");
        let output = self.run_local(&command)?;
        if output.is_success() {
            return Ok(output);
        }

        let status_text = output
            .code
            .map_or_else(|| String::from("unknown"), |code| code.to_string());
        warn!(status = %status_text, host = %connection.host, "rsync failed");
        Err(SyncError::CommandFailure {
            program: self.config.rsync_bin.clone(),
            status: output.code,
            status_text,
            stderr: output.stderr,
        })
    }

    fn run_local(&self, command: &str) -> Result<CommandOutput, SyncError> {
        let args = [OsString::from("-c"), OsString::from(command)];
        self.runner.run(&self.config.shell, &args)
    }
}

#[cfg(test)]
mod tests;
