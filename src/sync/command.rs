//! String assembly for the `rsync` command line.
//!
//! Every fragment is built by a small function so the quoting rules can be
//! asserted on in isolation. Spacing follows a fixed template; empty
//! fragments leave their separating spaces behind, which the shell ignores.

use camino::Utf8Path;

use crate::connection::ConnectionParams;

use super::options::{Direction, SyncOptions};

/// SSH option that disables host key verification.
pub const DISABLE_HOST_KEY_CHECKING: &str = "-o StrictHostKeyChecking=no";

/// Flags always passed to rsync (`-p -t -h -r -v -z`).
pub const BASE_FLAGS: &str = "-pthrvz";

/// Renders one ` --exclude "<pattern>"` fragment per pattern.
///
/// Double quotes inside a pattern are backslash-escaped so they cannot close
/// the surrounding quoted argument.
#[must_use]
pub fn exclude_fragments(patterns: &[String]) -> String {
    patterns
        .iter()
        .map(|pattern| format!(" --exclude \"{}\"", pattern.replace('"', "\\\"")))
        .collect()
}

/// Renders `-i <key>` for each key file, space separated.
#[must_use]
pub fn key_flags(key_files: &[String]) -> String {
    key_files
        .iter()
        .map(|key| format!("-i {key}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the caller's SSH options, adding [`DISABLE_HOST_KEY_CHECKING`]
/// when strict checking is off and the caller has not already asked for it.
#[must_use]
pub fn ssh_options(ssh_opts: &str, strict_host_keys: bool) -> String {
    if strict_host_keys || ssh_opts.contains(DISABLE_HOST_KEY_CHECKING) {
        return ssh_opts.to_owned();
    }
    format!("{ssh_opts} {DISABLE_HOST_KEY_CHECKING}")
}

/// Builds the `--rsh='ssh ...'` override, or an empty string when there is
/// nothing to pass to SSH.
#[must_use]
pub fn remote_shell_fragment(connection: &ConnectionParams, options: &SyncOptions) -> String {
    let parts = [
        key_flags(&connection.key_files),
        format!("-p {}", connection.port),
        ssh_options(&options.ssh_opts, options.strict_host_keys),
    ];
    if parts.iter().all(String::is_empty) {
        return String::new();
    }
    format!("--rsh='ssh {}'", parts.join(" "))
}

/// Assembles the option block: delete, excludes, base flags, extra rsync
/// options, chmod, then the remote shell override.
#[must_use]
pub fn option_string(connection: &ConnectionParams, options: &SyncOptions) -> String {
    let delete = if options.delete { "--delete" } else { "" };
    let excludes = exclude_fragments(&options.exclude);
    let chmod = options
        .mode
        .as_deref()
        .filter(|mode| !mode.is_empty())
        .map_or_else(String::new, |mode| format!("--chmod {mode}"));
    let rsh = remote_shell_fragment(connection, options);
    format!(
        "{delete}{excludes} {BASE_FLAGS} {extra} {chmod} {rsh}",
        extra = options.rsync_opts
    )
}

/// Builds the full rsync command line for `connection`.
///
/// IPv6 hosts are bracketed. The local-to-remote IPv6 form leaves both
/// endpoints unquoted; callers with spaces in `local_path` must quote it
/// themselves.
#[must_use]
pub fn build_rsync_command(
    rsync_bin: &str,
    connection: &ConnectionParams,
    local_path: &Utf8Path,
    remote_path: &Utf8Path,
    options: &SyncOptions,
) -> String {
    let opts = option_string(connection, options);
    let ConnectionParams { user, host, .. } = connection;
    match (connection.is_ipv6(), options.direction) {
        (true, Direction::RemoteToLocal) => {
            format!("{rsync_bin} {opts} '[{user}@{host}]:{remote_path}' '{local_path}'")
        }
        (true, Direction::LocalToRemote) => {
            format!("{rsync_bin} {opts} {local_path} [{user}@{host}]:{remote_path}")
        }
        (false, Direction::RemoteToLocal) => {
            format!("{rsync_bin} {opts} '{user}@{host}:{remote_path}' '{local_path}'")
        }
        (false, Direction::LocalToRemote) => {
            format!("{rsync_bin} {opts} '{local_path}' '{user}@{host}:{remote_path}'")
        }
    }
}
