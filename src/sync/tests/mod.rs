//! Unit tests for the sync module.
//!
//! Command construction, execution through the runner, configuration, and
//! the streaming runner each get their own submodule.

mod util;
