//! Project repository contract and SQLite implementation.
//!
//! # Invariants
//! - Project names are unique; a duplicate name surfaces as a `Db` error.
//! - Deleting a project drops it from every user's project sets.

use crate::model::project::{Project, ProjectId};
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PROJECT_SELECT_SQL: &str = "SELECT id, name, description FROM projects";

/// Repository interface for project persistence.
pub trait ProjectRepository {
    fn find_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Project>>;
    fn exists_by_name(&self, name: &str) -> RepoResult<bool>;
    /// Inserts (no id) or fully overwrites (with id) one project.
    fn save(&self, project: &Project) -> RepoResult<Project>;
    /// Deletes one project. Unsaved projects are a no-op.
    fn delete(&self, project: &Project) -> RepoResult<()>;
    fn find_all(&self) -> RepoResult<Vec<Project>>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["projects"])?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn find_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let project = self
            .conn
            .query_row(
                &format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_project_row,
            )
            .optional()?;
        Ok(project)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Project>> {
        let project = self
            .conn
            .query_row(
                &format!("{PROJECT_SELECT_SQL} WHERE name = ?1;"),
                [name],
                parse_project_row,
            )
            .optional()?;
        Ok(project)
    }

    fn exists_by_name(&self, name: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE name = ?1);",
            [name],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn save(&self, project: &Project) -> RepoResult<Project> {
        project.validate()?;

        let id = match project.id {
            Some(id) => {
                self.conn.execute(
                    "INSERT INTO projects (id, name, description)
                     VALUES (?1, ?2, ?3)
                     ON CONFLICT(id) DO UPDATE SET
                        name = excluded.name,
                        description = excluded.description,
                        updated_at = (strftime('%s', 'now') * 1000);",
                    params![id, project.name.as_str(), project.description.as_deref()],
                )?;
                id
            }
            None => {
                self.conn.execute(
                    "INSERT INTO projects (name, description) VALUES (?1, ?2);",
                    params![project.name.as_str(), project.description.as_deref()],
                )?;
                self.conn.last_insert_rowid()
            }
        };

        let mut saved = project.clone();
        saved.id = Some(id);
        Ok(saved)
    }

    fn delete(&self, project: &Project) -> RepoResult<()> {
        if let Some(id) = project.id {
            self.conn
                .execute("DELETE FROM projects WHERE id = ?1;", [id])?;
        }
        Ok(())
    }

    fn find_all(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY id ASC;"))?;
        let projects = stmt
            .query_map([], parse_project_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(projects)
    }
}

fn parse_project_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        description: row.get("description")?,
    })
}
