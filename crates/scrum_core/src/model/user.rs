//! User domain model.
//!
//! # Responsibility
//! - Define the canonical user record and its role taxonomy.
//! - Own the developer/scrum-master project sets as plain values.
//! - Provide the read-only `UserSummary` projection.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one on first save.
//! - Project sets never contain duplicates.
//! - `email` must look like `local@domain`, without padding, before persistence.

use crate::model::project::ProjectId;
use crate::model::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));

/// Numeric user identity assigned by the store.
pub type UserId = i64;

/// Role a user plays inside the scrum process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Implements backlog items. Required for developer assignment.
    Developer,
    /// Facilitates the team's scrum events.
    ScrumMaster,
    /// Owns the product backlog.
    ProductOwner,
}

impl Role {
    /// Stable storage/log representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Developer => "DEVELOPER",
            Self::ScrumMaster => "SCRUM_MASTER",
            Self::ProductOwner => "PRODUCT_OWNER",
        }
    }

    /// Parses the storage representation produced by [`Role::as_str`].
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "DEVELOPER" => Some(Self::Developer),
            "SCRUM_MASTER" => Some(Self::ScrumMaster),
            "PRODUCT_OWNER" => Some(Self::ProductOwner),
            _ => None,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identity. `None` for not-yet-saved users.
    pub id: Option<UserId>,
    /// Unique across users at creation time.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    /// Projects this user develops on.
    #[serde(default)]
    pub developer_projects: BTreeSet<ProjectId>,
    /// Projects this user acts as scrum master for.
    #[serde(default)]
    pub scrum_projects: BTreeSet<ProjectId>,
}

impl User {
    /// Creates an unsaved user with empty project sets.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: None,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role,
            developer_projects: BTreeSet::new(),
            scrum_projects: BTreeSet::new(),
        }
    }

    /// Adds a project to the developer set.
    ///
    /// Returns `false` when the project was already present.
    pub fn add_developer_project(&mut self, project_id: ProjectId) -> bool {
        self.developer_projects.insert(project_id)
    }

    /// Adds a project to the scrum-master set.
    ///
    /// Returns `false` when the project was already present.
    pub fn add_scrum_project(&mut self, project_id: ProjectId) -> bool {
        self.scrum_projects.insert(project_id)
    }

    /// Checks field-level invariants required before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::BlankField("email"));
        }
        // Emails are stored and compared verbatim; padded values are invalid.
        if !EMAIL_RE.is_match(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::BlankField("first_name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(ValidationError::BlankField("last_name"));
        }
        Ok(())
    }
}

/// Read-only projection returned by list/lookup use-cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Option<UserId>,
    pub email: String,
    pub first_name: String,
    pub role: Role,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            role: user.role,
        }
    }
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            role: user.role,
        }
    }
}
