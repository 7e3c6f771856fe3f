//! Per-call rsync options.

use serde::Deserialize;

use crate::connection::{OneOrMany, deserialize_one_or_many};

/// Which side of the transfer is the source.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Push local files to the remote host.
    #[default]
    LocalToRemote,
    /// Pull remote files down to the local path.
    RemoteToLocal,
}

/// Flags controlling a single rsync invocation.
///
/// Deserialises from a table where every key is optional, so sync profiles
/// can live in configuration files:
///
/// ```
/// # use hostsync::sync::{Direction, SyncOptions};
/// let options: SyncOptions = serde_json::from_str(
///     r#"{"exclude": "*.log", "delete": true, "direction": "remote-to-local"}"#,
/// )
/// .expect("options should parse");
/// assert_eq!(options.exclude, vec![String::from("*.log")]);
/// assert!(options.strict_host_keys);
/// assert_eq!(options.direction, Direction::RemoteToLocal);
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct SyncOptions {
    /// Patterns passed to rsync as `--exclude`, in order.
    #[serde(deserialize_with = "deserialize_one_or_many")]
    pub exclude: Vec<String>,
    /// Remove destination files that no longer exist at the source.
    pub delete: bool,
    /// Keep SSH host key checking enabled.
    pub strict_host_keys: bool,
    /// Extra options appended verbatim to the rsync flags.
    pub rsync_opts: String,
    /// Extra options appended verbatim to the SSH remote shell.
    pub ssh_opts: String,
    /// Permission string passed to `--chmod`.
    pub mode: Option<String>,
    /// Transfer direction.
    pub direction: Direction,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            delete: false,
            strict_host_keys: true,
            rsync_opts: String::new(),
            ssh_opts: String::new(),
            mode: None,
            direction: Direction::LocalToRemote,
        }
    }
}

impl SyncOptions {
    /// Replaces the exclude patterns, accepting a single pattern or a list.
    #[must_use]
    pub fn excluding(mut self, patterns: impl Into<OneOrMany>) -> Self {
        self.exclude = patterns.into().into_vec();
        self
    }

    /// Sets the transfer direction.
    #[must_use]
    pub const fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}
