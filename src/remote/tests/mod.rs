//! Unit tests for the remote inspection helpers.
