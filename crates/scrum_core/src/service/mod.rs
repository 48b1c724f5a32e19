//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into user lifecycle and assignment APIs.
//! - Translate absent records and failed preconditions into `ServiceError`.
//!
//! # Invariants
//! - Services never bypass repository validation/persistence contracts.
//! - Services remain storage-agnostic; collaborators are passed in.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod assignment_service;
pub mod user_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by user lifecycle and assignment use-cases.
///
/// The message carried by the first three variants is caller-facing text.
#[derive(Debug)]
pub enum ServiceError {
    /// Referenced user or project is absent.
    NotFound(String),
    /// Uniqueness rule violated on create.
    Conflict(String),
    /// Role precondition not met.
    RoleMismatch(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Returns whether this error reports an absent record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message) | Self::Conflict(message) | Self::RoleMismatch(message) => {
                f.write_str(message)
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
