//! What each public gateway operation turns a failed remote call into.
//!
//! Low-level fetches return `Result<T, FetchError>`; the public operations
//! then apply exactly one of [`with_fallback`] or [`propagate`], as listed by
//! [`Operation::policy`].

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListPosts,
    GetPost,
    PublicationInfo,
    ListProjects,
    ListFeaturedProjects,
    GetProject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Substitute a built-in value and report the call as degraded.
    Fallback,
    /// Hand the error to the caller.
    Propagate,
}

impl Operation {
    pub const fn policy(self) -> FailurePolicy {
        match self {
            Operation::ListPosts | Operation::GetPost | Operation::PublicationInfo => {
                FailurePolicy::Propagate
            }
            Operation::ListProjects | Operation::ListFeaturedProjects | Operation::GetProject => {
                FailurePolicy::Fallback
            }
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Operation::ListPosts => "list_posts",
            Operation::GetPost => "get_post",
            Operation::PublicationInfo => "publication_info",
            Operation::ListProjects => "list_projects",
            Operation::ListFeaturedProjects => "list_featured_projects",
            Operation::GetProject => "get_project",
        }
    }
}

/// How a call with a fallback ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchState {
    /// Missing endpoint or credentials; no request was attempted.
    Unconfigured,
    Succeeded,
    /// The request failed and the fallback was substituted.
    Degraded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub state: FetchState,
}

impl<T> Resolved<T> {
    pub fn succeeded(value: T) -> Self {
        Self {
            value,
            state: FetchState::Succeeded,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.state != FetchState::Succeeded
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            state: self.state,
        }
    }
}

pub fn with_fallback<T>(
    operation: Operation,
    outcome: Result<T, FetchError>,
    fallback: impl FnOnce() -> T,
) -> Resolved<T> {
    debug_assert_eq!(operation.policy(), FailurePolicy::Fallback);
    match outcome {
        Ok(value) => Resolved::succeeded(value),
        Err(FetchError::Unconfigured) => {
            debug!(operation = operation.name(), "remote service not configured, using fallback");
            Resolved {
                value: fallback(),
                state: FetchState::Unconfigured,
            }
        }
        Err(err) => {
            warn!(operation = operation.name(), error = %err, "remote fetch failed, using fallback");
            Resolved {
                value: fallback(),
                state: FetchState::Degraded,
            }
        }
    }
}

pub fn propagate<T>(operation: Operation, outcome: Result<T, FetchError>) -> Result<T, FetchError> {
    debug_assert_eq!(operation.policy(), FailurePolicy::Propagate);
    outcome.map_err(|err| {
        warn!(operation = operation.name(), error = %err, "remote fetch failed");
        err
    })
}
