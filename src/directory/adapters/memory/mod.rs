//! In-memory adapters for directory ports.

mod resolver;

pub use resolver::StaticCallerResolver;
