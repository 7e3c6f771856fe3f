//! Tests for sync module utility helpers.

use super::super::*;
use crate::test_helpers::EnvGuard;

#[test]
fn expand_tilde_expands_home_prefix() {
    let _guard = EnvGuard::set_vars(&[("HOME", "/home/deploy")]);
    assert_eq!(expand_tilde("~/.ssh/id_ed25519"), "/home/deploy/.ssh/id_ed25519");
}

#[test]
fn expand_tilde_leaves_other_paths_unchanged() {
    for path in ["/absolute/key", "relative/key", "~user/key"] {
        assert_eq!(expand_tilde(path), path);
    }
}
