//! Domain model for the scrum management core.
//!
//! # Responsibility
//! - Define canonical data structures used by repositories and services.
//! - Keep field-level validation next to the data it protects.
//!
//! # Invariants
//! - Users reference projects by id only; relationship sets are owned values.
//! - Identity is assigned by the store, never by callers.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod project;
pub mod user;

/// Field-level validation failure for domain records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trim.
    BlankField(&'static str),
    /// Email does not match `local@domain`.
    InvalidEmail(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "field `{field}` must not be blank"),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
        }
    }
}

impl Error for ValidationError {}
