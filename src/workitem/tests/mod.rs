//! Unit tests for the work-item module.

mod lifecycle_tests;
mod service_tests;
