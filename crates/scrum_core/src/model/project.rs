//! Project domain model.
//!
//! Projects are referenced by users through id sets; a project never owns
//! its members.

use crate::model::ValidationError;
use serde::{Deserialize, Serialize};

/// Numeric project identity assigned by the store.
pub type ProjectId = i64;

/// Canonical project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Store-assigned identity. `None` for not-yet-saved projects.
    pub id: Option<ProjectId>,
    /// Unique project name.
    pub name: String,
    pub description: Option<String>,
}

impl Project {
    /// Creates an unsaved project without description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
        }
    }

    /// Builder-style description setter.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks field-level invariants required before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankField("name"));
        }
        Ok(())
    }
}
