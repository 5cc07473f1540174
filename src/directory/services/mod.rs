//! Orchestration services for the directory module.

mod provisioning;

pub use provisioning::{
    CreateTeamRequest, ProvisioningError, ProvisioningResult, ProvisioningService,
};
