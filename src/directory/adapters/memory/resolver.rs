//! Static credential-to-caller resolver for tests and embedded setups.

use crate::directory::domain::Caller;
use crate::directory::ports::{CallerResolver, IdentityError, IdentityResult};
use async_trait::async_trait;
use std::collections::HashMap;

/// Resolver backed by a fixed credential table.
#[derive(Debug, Clone, Default)]
pub struct StaticCallerResolver {
    callers: HashMap<String, Caller>,
}

impl StaticCallerResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a credential for the given caller.
    #[must_use]
    pub fn with_caller(mut self, credential: impl Into<String>, caller: Caller) -> Self {
        self.callers.insert(credential.into(), caller);
        self
    }
}

#[async_trait]
impl CallerResolver for StaticCallerResolver {
    async fn resolve(&self, credential: &str) -> IdentityResult<Caller> {
        self.callers
            .get(credential)
            .cloned()
            .ok_or(IdentityError::Unauthenticated)
    }
}
