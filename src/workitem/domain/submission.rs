//! Submission evidence attached to a work item.

use super::WorkItemDomainError;
use crate::directory::domain::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, non-empty repository URL pointing at the implementation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GitHubUrl(String);

impl GitHubUrl {
    /// Creates a validated URL.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::MissingSubmissionUrl`] when the value
    /// is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, WorkItemDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(WorkItemDomainError::MissingSubmissionUrl);
        }
        Ok(Self(trimmed))
    }

    /// Returns the URL as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for GitHubUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for GitHubUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated, non-empty rejection feedback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feedback(String);

impl Feedback {
    /// Creates validated feedback.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::MissingFeedback`] when the value is
    /// empty after trimming. Rejection without a reason is rejected by the
    /// engine itself.
    pub fn new(value: impl Into<String>) -> Result<Self, WorkItemDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(WorkItemDomainError::MissingFeedback);
        }
        Ok(Self(trimmed))
    }

    /// Returns the feedback as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the feedback, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Implementation evidence recorded by a Submit.
///
/// The `context` field is shared between the submitter's explanation and
/// reviewer feedback: a rejection overwrites it with the feedback text, so
/// the original explanation is not recoverable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    submitted_by: UserId,
    github_url: GitHubUrl,
    context: Option<String>,
}

impl Submission {
    /// Creates a submission record.
    #[must_use]
    pub const fn new(submitted_by: UserId, github_url: GitHubUrl, context: Option<String>) -> Self {
        Self {
            submitted_by,
            github_url,
            context,
        }
    }

    /// Returns the submitting user.
    #[must_use]
    pub const fn submitted_by(&self) -> UserId {
        self.submitted_by
    }

    /// Returns the repository URL.
    #[must_use]
    pub const fn github_url(&self) -> &GitHubUrl {
        &self.github_url
    }

    /// Returns the context text (explanation or, after a rejection, the
    /// reviewer's feedback).
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub(crate) fn overwrite_context(&mut self, text: String) {
        self.context = Some(text);
    }
}
