//! Orchestration services for the assignment module.

mod planning;

pub use planning::{CreateProjectRequest, PlanningError, PlanningResult, PlanningService};
