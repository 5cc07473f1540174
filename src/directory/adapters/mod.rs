//! Adapter implementations for directory ports.

pub mod memory;
