//! Project assignment service.
//!
//! # Responsibility
//! - Attach projects to a user's developer or scrum-master set.
//! - Check identity and role preconditions before mutating the user.
//!
//! # Invariants
//! - Developer assignment requires `Role::Developer`.
//! - Scrum-master assignment has no role precondition.
//! - Projects are never mutated; only the user record is saved.
//! - Re-assigning an already present project leaves the set unchanged.

use crate::model::project::ProjectId;
use crate::model::user::{Role, UserId};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::user_repo::UserRepository;
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};

/// Use-case service linking users to projects.
pub struct AssignmentService<U: UserRepository, P: ProjectRepository> {
    users: U,
    projects: P,
}

impl<U: UserRepository, P: ProjectRepository> AssignmentService<U, P> {
    /// Creates a service from user and project repositories.
    pub fn new(users: U, projects: P) -> Self {
        Self { users, projects }
    }

    /// Adds a project to a developer's project set.
    ///
    /// # Errors
    /// - `NotFound` when the project or the user does not exist (project is
    ///   checked first).
    /// - `RoleMismatch` when the user is not a developer; nothing is saved.
    pub fn assign_project_to_developer(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ServiceResult<()> {
        let project = self.projects.find_by_id(project_id)?.ok_or_else(|| {
            ServiceError::NotFound(format!("No Project with ID: {project_id}"))
        })?;
        let mut user = self.users.find_by_id(user_id)?.ok_or_else(|| {
            ServiceError::NotFound(format!("No Developer with ID: {user_id}"))
        })?;

        if user.role != Role::Developer {
            warn!(
                "event=assign_developer module=service status=rejected reason=role_mismatch user_id={} role={}",
                user_id, user.role
            );
            return Err(ServiceError::RoleMismatch(
                "User Must be Developer Role".to_string(),
            ));
        }

        let added = user.add_developer_project(project.id.unwrap_or(project_id));
        self.users.save(&user)?;
        info!(
            "event=assign_developer module=service status=ok user_id={} project_id={} added={}",
            user_id, project_id, added
        );
        Ok(())
    }

    /// Adds a project to the scrum-master set of the user with this exact name.
    ///
    /// When several users share the name, the one with the lowest id is used.
    ///
    /// # Errors
    /// - `NotFound` when no user has this name or the project does not exist
    ///   (user is checked first).
    pub fn assign_project_to_scrum_master(
        &self,
        project_id: ProjectId,
        first_name: &str,
        last_name: &str,
    ) -> ServiceResult<()> {
        let mut user = self
            .users
            .find_by_full_name(first_name, last_name)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("No User found named {first_name} {last_name}"))
            })?;
        let project = self.projects.find_by_id(project_id)?.ok_or_else(|| {
            ServiceError::NotFound(format!("No Project found With Id {project_id}"))
        })?;

        let added = user.add_scrum_project(project.id.unwrap_or(project_id));
        let saved = self.users.save(&user)?;
        info!(
            "event=assign_scrum_master module=service status=ok user_id={} project_id={} added={}",
            saved.id.unwrap_or_default(),
            project_id,
            added
        );
        Ok(())
    }
}
