//! Remote filesystem inspection over an existing connection.
//!
//! The helpers here send plain POSIX shell snippets (`[ -d ... ]`, `ls`) to a
//! [`RemoteConnection`] and parse the text that comes back. Remote paths are
//! interpolated without quoting; paths containing whitespace or shell
//! metacharacters are not supported.

use camino::Utf8Path;
use thiserror::Error;
use tracing::debug;

use crate::sync::SyncError;

mod ssh;

pub use ssh::SshConnection;

/// Marker echoed by the existence check when the test succeeds.
pub const FOUND_MARKER: &str = "OK";

/// Marker echoed by the existence check when the test fails.
pub const MISSING_MARKER: &str = "Failed";

/// Output captured from a command executed on the remote host.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemoteCommandOutput {
    /// Exit code reported by the remote command, if any.
    pub exit_code: Option<i32>,
    /// Captured standard output stream.
    pub stdout: String,
    /// Captured standard error stream.
    pub stderr: String,
}

/// Errors surfaced by a [`RemoteConnection`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RemoteError {
    /// The local transport (for example the `ssh` client) could not run.
    #[error("remote transport failed: {0}")]
    Transport(#[from] SyncError),
    /// A connection implementation reported its own failure.
    #[error("remote connection failed: {message}")]
    Connection {
        /// Description supplied by the connection.
        message: String,
    },
}

/// Executes shell commands on a remote host.
pub trait RemoteConnection {
    /// Runs `command` remotely and returns its captured output.
    ///
    /// A non-zero remote exit status is reported through
    /// [`RemoteCommandOutput::exit_code`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the command could not be delivered.
    fn run_command(&self, command: &str) -> Result<RemoteCommandOutput, RemoteError>;
}

impl<T: RemoteConnection + ?Sized> RemoteConnection for &T {
    fn run_command(&self, command: &str) -> Result<RemoteCommandOutput, RemoteError> {
        (**self).run_command(command)
    }
}

/// Kind of filesystem entry an existence check looks for.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PathKind {
    /// A regular file (`test -f`).
    #[default]
    File,
    /// A directory (`test -d`).
    Directory,
}

impl PathKind {
    const fn test_flag(self) -> char {
        match self {
            Self::File => 'f',
            Self::Directory => 'd',
        }
    }
}

impl From<bool> for PathKind {
    /// Maps an `is_dir` flag onto a path kind.
    fn from(is_dir: bool) -> Self {
        if is_dir { Self::Directory } else { Self::File }
    }
}

/// Builds the shell snippet used by [`exists`].
#[must_use]
pub fn exists_command(remote_path: &Utf8Path, kind: PathKind) -> String {
    format!(
        "[ -{flag} {remote_path} ] && echo {FOUND_MARKER} || echo \"{MISSING_MARKER}\"",
        flag = kind.test_flag()
    )
}

/// Checks whether `remote_path` exists on the remote host as `kind`.
///
/// A missing path yields `Ok(false)`.
///
/// # Errors
///
/// Propagates connection failures from `connection`.
pub fn exists<C>(
    remote_path: &Utf8Path,
    connection: &C,
    kind: PathKind,
) -> Result<bool, RemoteError>
where
    C: RemoteConnection + ?Sized,
{
    let command = exists_command(remote_path, kind);
    debug!(%command, "checking remote path");
    let output = connection.run_command(&command)?;
    Ok(output.stdout.trim() == FOUND_MARKER)
}

/// Builds the shell snippet used by [`list_dir`].
///
/// The suffix filter is an unanchored `grep .<suffix>`, so `foo.txtbar`
/// matches a `txt` suffix too.
#[must_use]
pub fn list_dir_command(remote_path: &Utf8Path, suffix: Option<&str>) -> String {
    match suffix.filter(|value| !value.is_empty()) {
        Some(value) => format!("ls {remote_path} | grep .{value}"),
        None => format!("ls {remote_path}"),
    }
}

/// Lists the entries of `remote_path`, optionally filtered by `suffix`.
///
/// Output is split on whitespace, so names containing spaces come back as
/// several entries. A missing directory yields an empty list.
///
/// # Errors
///
/// Propagates connection failures from `connection`.
pub fn list_dir<C>(
    remote_path: &Utf8Path,
    connection: &C,
    suffix: Option<&str>,
) -> Result<Vec<String>, RemoteError>
where
    C: RemoteConnection + ?Sized,
{
    let command = list_dir_command(remote_path, suffix);
    debug!(%command, "listing remote directory");
    let output = connection.run_command(&command)?;
    Ok(output
        .stdout
        .split_whitespace()
        .map(str::to_owned)
        .collect())
}

#[cfg(test)]
mod tests;
