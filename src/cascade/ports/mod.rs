//! Port for the storage backing cascade computation and execution.

mod store;

pub use store::{CascadeStore, CascadeStoreError, CascadeStoreResult};
