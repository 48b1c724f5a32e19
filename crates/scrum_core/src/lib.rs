//! Core domain logic for the scrum management service.
//! This crate is the single source of truth for user/project invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{Project, ProjectId};
pub use model::user::{Role, User, UserId, UserSummary};
pub use model::ValidationError;
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::assignment_service::AssignmentService;
pub use service::user_service::{Crud, UserService};
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
