//! Unit tests for the cascade module.

mod engine_tests;
