//! Identifier types for the assignment domain.

use crate::directory::domain::entity_id;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

entity_id! {
    /// Unique identifier for a project record.
    ProjectId
}

entity_id! {
    /// Unique identifier for a project-to-team assignment record.
    AssignmentId
}
