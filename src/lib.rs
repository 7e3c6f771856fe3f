//! rsync and SSH helpers for synchronising and inspecting remote hosts.
//!
//! The crate assembles shell command lines for the system `rsync` and `ssh`
//! binaries from explicit connection parameters, then delegates execution to
//! an injected [`CommandRunner`] or [`RemoteConnection`]. Everything is
//! synchronous; each operation performs one blocking external call.

pub mod connection;
pub mod remote;
pub mod sync;
#[cfg(test)]
pub mod test_helpers;
pub mod test_support;

pub use connection::{ConnectionParams, DEFAULT_SSH_PORT, OneOrMany};
pub use remote::{
    PathKind, RemoteCommandOutput, RemoteConnection, RemoteError, SshConnection, exists, list_dir,
};
pub use sync::{
    CommandOutput, CommandRunner, Direction, ProcessCommandRunner, StreamingCommandRunner,
    SyncConfig, SyncConfigLoadError, SyncError, SyncOptions, Syncer,
};
