//! Brigade: coordination core for role-based project delivery.
//!
//! This crate provides the domain logic shared by the surrounding project
//! management system: the assignment hierarchy binding Projects to Teams,
//! the Task/Subtask work-item lifecycle, and the cascading-deletion engine
//! that keeps the entity graph referentially consistent when users, teams,
//! or projects are removed.
//!
//! # Architecture
//!
//! Brigade follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`directory`]: Users, role capability sets, teams, and caller identity
//! - [`assignment`]: Projects and project-to-team assignments
//! - [`workitem`]: Task and Subtask creation and the shared status lifecycle
//! - [`cascade`]: Transitive deletion closures and their atomic execution
//! - [`store`]: The bundled in-memory entity store implementing every port

pub mod assignment;
pub mod cascade;
pub mod directory;
pub mod store;
pub mod workitem;
