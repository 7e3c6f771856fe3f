//! Shared fixtures for remote inspection scenarios.

use hostsync::RemoteError;
use hostsync::test_support::ScriptedConnection;
use rstest::fixture;

#[derive(Clone, Debug)]
pub enum InspectOutcome {
    Exists(bool),
    Listing(Vec<String>),
    Failed(RemoteError),
}

#[derive(Clone, Debug)]
pub struct RemoteContext {
    pub connection: ScriptedConnection,
    pub outcome: Option<InspectOutcome>,
}

#[fixture]
pub fn remote_context() -> RemoteContext {
    RemoteContext {
        connection: ScriptedConnection::new(),
        outcome: None,
    }
}
