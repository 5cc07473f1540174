//! Cascading deletion of users, teams, and projects.
//!
//! Deleting an entity must never leave dangling references. This module
//! computes the transitive closure of records a deletion removes or
//! scrubs, authorizes the operation against the closure's root, and hands
//! the closure to the store for atomic execution.

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
