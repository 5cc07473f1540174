//! Identity port resolving requests to caller identities.

use crate::directory::domain::Caller;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for identity resolution.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// External collaborator that resolves a request credential to a caller.
///
/// Token issuance and verification mechanics live outside this crate; the
/// core only consumes the resolved `(user, roles)` pair.
#[async_trait]
pub trait CallerResolver: Send + Sync {
    /// Resolves a request credential to the acting caller.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unauthenticated`] when the credential does
    /// not map to a known identity.
    async fn resolve(&self, credential: &str) -> IdentityResult<Caller>;
}

/// Errors returned by identity resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The credential does not map to a known identity.
    #[error("credential is not authenticated")]
    Unauthenticated,
}
