//! Work-item lifecycle management for Brigade.
//!
//! Tasks decompose an assigned project; subtasks decompose a task and are
//! assigned to individual team members. Both share one status lifecycle
//! (`Pending`, `In Progress`, `Completed`, `Re Assigned`) driven by three
//! operations: Submit (assignee attaches implementation evidence), Approve
//! and Reject (reviewer decision, rejection requires feedback). Transitions
//! are guarded by the domain state machine and serialized per item through
//! optimistic version stamps. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
