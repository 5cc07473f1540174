//! Unit tests for the directory module.

mod service_tests;
