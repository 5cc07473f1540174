//! The cascade engine orchestrating closure computation and execution.

mod engine;

pub use engine::{BulkCascadeOutcome, BulkFailure, CascadeEngine, CascadeEngineResult, CascadeError};
