//! Project portfolio and project-to-team assignment for Brigade.
//!
//! A project is created independently of any team; binding it to a team
//! happens through a `ProjectAssignment`, of which at most one may be
//! active per project at any instant. Retiring the active assignment is
//! the prerequisite for re-assignment. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
