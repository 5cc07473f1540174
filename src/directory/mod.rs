//! User directory and team membership for Brigade.
//!
//! The directory owns the User and Team entities, the role capability
//! sets that drive every authorization decision, and the identity port
//! through which the surrounding system resolves a request to a caller.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
