//! Unit tests for the session lifecycle.

mod phase_tests;
