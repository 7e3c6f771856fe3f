//! BDD scenarios for rsync synchronisation.

use rstest_bdd_macros::scenario;

use super::test_helpers::{SyncContext, sync_context};

#[scenario(
    path = "tests/features/sync.feature",
    name = "Push a build directory with excludes"
)]
fn scenario_push_with_excludes(sync_context: SyncContext) {
    let _ = sync_context;
}

#[scenario(path = "tests/features/sync.feature", name = "Pull from an IPv6 host")]
fn scenario_pull_from_ipv6(sync_context: SyncContext) {
    let _ = sync_context;
}

#[scenario(
    path = "tests/features/sync.feature",
    name = "Disable host key checking without duplicating the flag"
)]
fn scenario_disable_host_keys(sync_context: SyncContext) {
    let _ = sync_context;
}

#[scenario(path = "tests/features/sync.feature", name = "Surface rsync failures")]
fn scenario_surface_failures(sync_context: SyncContext) {
    let _ = sync_context;
}
