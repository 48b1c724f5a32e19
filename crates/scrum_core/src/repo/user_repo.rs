//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide id/email/full-name lookups and save/delete over `users`.
//! - Persist developer and scrum-master project sets as link rows.
//!
//! # Invariants
//! - `save` replaces both project sets in the same transaction as the row.
//! - `find_all` and name lookups return rows in ascending id order.
//! - Read paths reject unknown role text instead of masking it.

use crate::model::project::ProjectId;
use crate::model::user::{Role, User, UserId};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::collections::BTreeSet;

const USER_SELECT_SQL: &str = "SELECT
    id,
    email,
    first_name,
    last_name,
    role
FROM users";

const DEVELOPER_LINKS_TABLE: &str = "user_developer_projects";
const SCRUM_LINKS_TABLE: &str = "user_scrum_projects";

/// Repository interface for user persistence.
pub trait UserRepository {
    /// Loads one user with both project sets.
    fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Loads the first user (lowest id) with the exact email.
    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    /// Loads the first user (lowest id) with the exact first/last name pair.
    fn find_by_full_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<Option<User>>;
    /// Returns whether any user already uses `email`.
    fn exists_by_email(&self, email: &str) -> RepoResult<bool>;
    /// Inserts (no id) or fully overwrites (with id) one user.
    fn save(&self, user: &User) -> RepoResult<User>;
    /// Deletes one user and its project links. Unsaved users are a no-op.
    fn delete(&self, user: &User) -> RepoResult<()>;
    /// Lists all users in store order.
    fn find_all(&self) -> RepoResult<Vec<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["users", DEVELOPER_LINKS_TABLE, SCRUM_LINKS_TABLE])?;
        Ok(Self { conn })
    }

    fn find_one(&self, filter: &str, args: impl rusqlite::Params) -> RepoResult<Option<User>> {
        let row = self
            .conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE {filter} ORDER BY id ASC LIMIT 1;"),
                args,
                UserRow::from_row,
            )
            .optional()?;

        match row {
            Some(row) => Ok(Some(row.into_user(self.conn)?)),
            None => Ok(None),
        }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        self.find_one("id = ?1", [id])
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.find_one("email = ?1", [email])
    }

    fn find_by_full_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<Option<User>> {
        self.find_one(
            "first_name = ?1 AND last_name = ?2",
            params![first_name, last_name],
        )
    }

    fn exists_by_email(&self, email: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1);",
            [email],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn save(&self, user: &User) -> RepoResult<User> {
        user.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let id = match user.id {
            Some(id) => {
                tx.execute(
                    "INSERT INTO users (id, email, first_name, last_name, role)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(id) DO UPDATE SET
                        email = excluded.email,
                        first_name = excluded.first_name,
                        last_name = excluded.last_name,
                        role = excluded.role,
                        updated_at = (strftime('%s', 'now') * 1000);",
                    params![
                        id,
                        user.email.as_str(),
                        user.first_name.as_str(),
                        user.last_name.as_str(),
                        user.role.as_str(),
                    ],
                )?;
                id
            }
            None => {
                tx.execute(
                    "INSERT INTO users (email, first_name, last_name, role)
                     VALUES (?1, ?2, ?3, ?4);",
                    params![
                        user.email.as_str(),
                        user.first_name.as_str(),
                        user.last_name.as_str(),
                        user.role.as_str(),
                    ],
                )?;
                tx.last_insert_rowid()
            }
        };

        replace_links(&tx, DEVELOPER_LINKS_TABLE, id, &user.developer_projects)?;
        replace_links(&tx, SCRUM_LINKS_TABLE, id, &user.scrum_projects)?;
        tx.commit()?;

        let mut saved = user.clone();
        saved.id = Some(id);
        Ok(saved)
    }

    fn delete(&self, user: &User) -> RepoResult<()> {
        let Some(id) = user.id else {
            return Ok(());
        };

        // Link rows go with the user through ON DELETE CASCADE.
        self.conn.execute("DELETE FROM users WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn find_all(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
        let rows = stmt
            .query_map([], UserRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|row| row.into_user(self.conn))
            .collect()
    }
}

/// Raw `users` row before role parsing and link loading.
struct UserRow {
    id: UserId,
    email: String,
    first_name: String,
    last_name: String,
    role: String,
}

impl UserRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            email: row.get("email")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            role: row.get("role")?,
        })
    }

    fn into_user(self, conn: &Connection) -> RepoResult<User> {
        let role = Role::parse(&self.role).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid role `{}` in users.role", self.role))
        })?;

        Ok(User {
            id: Some(self.id),
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role,
            developer_projects: load_links(conn, DEVELOPER_LINKS_TABLE, self.id)?,
            scrum_projects: load_links(conn, SCRUM_LINKS_TABLE, self.id)?,
        })
    }
}

fn load_links(
    conn: &Connection,
    table: &'static str,
    user_id: UserId,
) -> RepoResult<BTreeSet<ProjectId>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT project_id FROM {table} WHERE user_id = ?1;"
    ))?;
    let ids = stmt
        .query_map([user_id], |row| row.get::<_, ProjectId>(0))?
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok(ids)
}

fn replace_links(
    tx: &Transaction<'_>,
    table: &'static str,
    user_id: UserId,
    project_ids: &BTreeSet<ProjectId>,
) -> RepoResult<()> {
    tx.execute(&format!("DELETE FROM {table} WHERE user_id = ?1;"), [user_id])?;

    let mut insert = tx.prepare(&format!(
        "INSERT INTO {table} (user_id, project_id) VALUES (?1, ?2);"
    ))?;
    for project_id in project_ids {
        insert.execute(params![user_id, project_id])?;
    }
    Ok(())
}
