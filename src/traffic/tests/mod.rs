//! Unit tests for traffic configuration.

mod builder_call_tests;
