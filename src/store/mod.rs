//! Bundled storage adapters.
//!
//! One store implements every persistence port plus hierarchy resolution
//! and cascade execution, so cross-entity invariants (roster references,
//! the single-active-assignment index, atomic deletion closures) live in
//! one place instead of being scattered across per-entity adapters.

mod memory;

pub use memory::InMemoryStore;
