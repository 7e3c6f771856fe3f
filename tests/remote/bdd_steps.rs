//! BDD step definitions for remote filesystem inspection.

use camino::Utf8Path;
use hostsync::{PathKind, RemoteError, exists, list_dir};
use rstest_bdd_macros::{given, then, when};

use super::test_helpers::{InspectOutcome, RemoteContext};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
}

#[given("the remote answers \"{stdout}\"")]
fn remote_answers(remote_context: RemoteContext, stdout: String) -> RemoteContext {
    remote_context.connection.push_stdout(format!("{stdout}\n"));
    remote_context
}

#[given("the remote connection drops with \"{message}\"")]
fn remote_drops(remote_context: RemoteContext, message: String) -> RemoteContext {
    remote_context.connection.push_error(message);
    remote_context
}

fn check(mut remote_context: RemoteContext, path: &str, kind: PathKind) -> RemoteContext {
    let outcome = match exists(Utf8Path::new(path), &remote_context.connection, kind) {
        Ok(found) => InspectOutcome::Exists(found),
        Err(err) => InspectOutcome::Failed(err),
    };
    remote_context.outcome = Some(outcome);
    remote_context
}

#[when("I check whether directory \"{path}\" exists")]
fn check_directory(remote_context: RemoteContext, path: String) -> RemoteContext {
    check(remote_context, &path, PathKind::Directory)
}

#[when("I check whether file \"{path}\" exists")]
fn check_file(remote_context: RemoteContext, path: String) -> RemoteContext {
    check(remote_context, &path, PathKind::File)
}

#[when("I list \"{path}\" filtered by suffix \"{suffix}\"")]
fn list_with_suffix(
    mut remote_context: RemoteContext,
    path: String,
    suffix: String,
) -> RemoteContext {
    let outcome = match list_dir(
        Utf8Path::new(&path),
        &remote_context.connection,
        Some(suffix.as_str()),
    ) {
        Ok(entries) => InspectOutcome::Listing(entries),
        Err(err) => InspectOutcome::Failed(err),
    };
    remote_context.outcome = Some(outcome);
    remote_context
}

fn expect_exists(remote_context: &RemoteContext, expected: bool) -> Result<(), StepError> {
    match &remote_context.outcome {
        Some(InspectOutcome::Exists(found)) if *found == expected => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected existence {expected}, got {other:?}"
        ))),
    }
}

#[then("the remote path is reported as present")]
fn reported_present(remote_context: &RemoteContext) -> Result<(), StepError> {
    expect_exists(remote_context, true)
}

#[then("the remote path is reported as absent")]
fn reported_absent(remote_context: &RemoteContext) -> Result<(), StepError> {
    expect_exists(remote_context, false)
}

#[then("the remote was asked to test \"{expression}\"")]
fn asked_to_test(remote_context: &RemoteContext, expression: String) -> Result<(), StepError> {
    let needle = format!("[ {expression} ]");
    let commands = remote_context.connection.commands();
    if commands.iter().any(|command| command.contains(&needle)) {
        return Ok(());
    }
    Err(StepError::Assertion(format!(
        "expected a command containing {needle}, got {commands:?}"
    )))
}

#[then("the remote received \"{command}\"")]
fn remote_received(remote_context: &RemoteContext, command: String) -> Result<(), StepError> {
    let commands = remote_context.connection.commands();
    if commands.contains(&command) {
        return Ok(());
    }
    Err(StepError::Assertion(format!(
        "expected command {command}, got {commands:?}"
    )))
}

#[then("the listing is \"{entries}\"")]
fn listing_is(remote_context: &RemoteContext, entries: String) -> Result<(), StepError> {
    let expected: Vec<String> = entries.split(',').map(str::to_owned).collect();
    match &remote_context.outcome {
        Some(InspectOutcome::Listing(actual)) if *actual == expected => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected listing {expected:?}, got {other:?}"
        ))),
    }
}

#[then("the check fails with \"{message}\"")]
fn check_fails(remote_context: &RemoteContext, message: String) -> Result<(), StepError> {
    match &remote_context.outcome {
        Some(InspectOutcome::Failed(RemoteError::Connection { message: actual }))
            if *actual == message =>
        {
            Ok(())
        }
        other => Err(StepError::Assertion(format!(
            "expected connection failure {message:?}, got {other:?}"
        ))),
    }
}
