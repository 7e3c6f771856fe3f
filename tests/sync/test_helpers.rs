//! Shared fixtures for sync BDD scenarios.

use hostsync::test_support::ScriptedRunner;
use hostsync::{CommandOutput, ConnectionParams, SyncConfig, SyncError, SyncOptions};
use rstest::fixture;

#[derive(Clone, Debug)]
pub enum SyncOutcome {
    Completed(CommandOutput),
    Failed(SyncError),
}

#[derive(Clone, Debug)]
pub struct SyncContext {
    pub runner: ScriptedRunner,
    pub config: SyncConfig,
    pub connection: ConnectionParams,
    pub options: SyncOptions,
    pub outcome: Option<SyncOutcome>,
}

impl SyncContext {
    /// Returns the script handed to the shell by the last sync.
    pub fn last_script(&self) -> Option<String> {
        self.runner
            .invocations()
            .last()
            .and_then(hostsync::test_support::CommandInvocation::shell_script)
    }
}

#[fixture]
pub fn sync_context() -> SyncContext {
    SyncContext {
        runner: ScriptedRunner::new(),
        config: SyncConfig {
            rsync_bin: String::from("rsync"),
            ssh_bin: String::from("ssh"),
            shell: String::from("sh"),
            ssh_batch_mode: Some(true),
            ssh_strict_host_key_checking: Some(true),
        },
        connection: ConnectionParams::new("root", "localhost", 22),
        options: SyncOptions::default(),
        outcome: None,
    }
}
