//! Synchronisation configuration structures and validation.
//!
//! This module defines [`SyncConfig`] for the executables and SSH defaults
//! used by the sync and remote helpers, along with associated error types.
//! Configuration is loaded via `ortho-config` which merges defaults,
//! configuration files, and environment variables.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Executable and shell settings loaded via `ortho-config`.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "HOSTSYNC",
    discovery(
        app_name = "hostsync",
        env_var = "HOSTSYNC_CONFIG_PATH",
        config_file_name = "hostsync.toml",
        dotfile_name = ".hostsync.toml",
        project_file_name = "hostsync.toml"
    )
)]
pub struct SyncConfig {
    /// Path to the `rsync` executable.
    #[ortho_config(default = "rsync".to_owned())]
    pub rsync_bin: String,
    /// Path to the `ssh` executable.
    #[ortho_config(default = "ssh".to_owned())]
    pub ssh_bin: String,
    /// Shell used to run the assembled rsync command line.
    #[ortho_config(default = "sh".to_owned())]
    pub shell: String,
    /// Whether to force batch mode for SSH to avoid password prompts.
    ///
    /// Unset means enabled; read it through [`SyncConfig::batch_mode`].
    #[serde(default)]
    pub ssh_batch_mode: Option<bool>,
    /// Whether SSH remote connections enforce host key checking.
    ///
    /// Unset means enabled; read it through
    /// [`SyncConfig::strict_host_key_checking`].
    #[serde(default)]
    pub ssh_strict_host_key_checking: Option<bool>,
}

/// Errors raised when loading the sync configuration from layered sources.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SyncConfigLoadError {
    /// Indicates that parsing or merging configuration layers failed.
    #[error("sync configuration parsing failed: {0}")]
    Parse(String),
}

impl SyncConfig {
    /// Returns whether SSH runs in batch mode, enabled unless set to `false`.
    #[must_use]
    pub fn batch_mode(&self) -> bool {
        self.ssh_batch_mode.unwrap_or(true)
    }

    /// Returns whether SSH verifies host keys, enabled unless set to `false`.
    #[must_use]
    pub fn strict_host_key_checking(&self) -> bool {
        self.ssh_strict_host_key_checking.unwrap_or(true)
    }

    /// Ensures configuration values are present after trimming whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] when any required field is empty.
    pub fn validate(&self) -> Result<(), SyncError> {
        Self::require_value(&self.rsync_bin, "rsync_bin")?;
        Self::require_value(&self.ssh_bin, "ssh_bin")?;
        Self::require_value(&self.shell, "shell")?;
        Ok(())
    }

    /// Loads configuration using defaults, configuration files, and
    /// environment variables without consulting the process arguments.
    ///
    /// # Errors
    ///
    /// Returns [`SyncConfigLoadError::Parse`] when merging sources fails.
    pub fn load_without_cli_args() -> Result<Self, SyncConfigLoadError> {
        Self::load_from_iter([std::ffi::OsString::from("hostsync")])
            .map_err(|err| SyncConfigLoadError::Parse(err.to_string()))
    }

    fn require_value(value: &str, field: &str) -> Result<(), SyncError> {
        if value.trim().is_empty() {
            return Err(SyncError::InvalidConfig {
                field: field.to_owned(),
            });
        }
        Ok(())
    }
}

/// Errors surfaced while performing synchronisation or running commands.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SyncError {
    /// Raised when configuration is missing required values. The error message
    /// includes guidance on how to provide the value via environment variable
    /// or configuration file.
    #[error("missing {field}: set HOSTSYNC_{env_suffix} or add {field} to hostsync.toml", env_suffix = field.to_uppercase())]
    InvalidConfig {
        /// Configuration field that failed validation.
        field: String,
    },
    /// Raised when a command cannot be spawned.
    #[error("failed to spawn {program}: {message}")]
    Spawn {
        /// Command that failed to start.
        program: String,
        /// Operating system error string.
        message: String,
    },
    /// Raised when `rsync` completes with a non-zero exit code.
    #[error("{program} exited with status {status_text}: {stderr}")]
    CommandFailure {
        /// Command name used for the attempted operation.
        program: String,
        /// Exit status as reported by the OS.
        status: Option<i32>,
        /// Human readable representation of the exit status.
        status_text: String,
        /// Stderr captured from the process.
        stderr: String,
    },
}
