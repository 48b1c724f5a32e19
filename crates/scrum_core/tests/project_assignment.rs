use rusqlite::Connection;
use scrum_core::db::open_db_in_memory;
use scrum_core::{
    AssignmentService, Project, ProjectRepository, Role, ServiceError, SqliteProjectRepository,
    SqliteUserRepository, User, UserRepository, UserService,
};
use std::collections::BTreeSet;

fn assignment_service(
    conn: &Connection,
) -> AssignmentService<SqliteUserRepository<'_>, SqliteProjectRepository<'_>> {
    AssignmentService::new(
        SqliteUserRepository::try_new(conn).unwrap(),
        SqliteProjectRepository::try_new(conn).unwrap(),
    )
}

fn seed_project(conn: &Connection, id: i64, name: &str) {
    let projects = SqliteProjectRepository::try_new(conn).unwrap();
    let mut project = Project::new(name);
    project.id = Some(id);
    projects.save(&project).unwrap();
}

fn seed_user(conn: &Connection, email: &str, first: &str, last: &str, role: Role) -> User {
    let users = SqliteUserRepository::try_new(conn).unwrap();
    users.save(&User::new(email, first, last, role)).unwrap()
}

fn reload(conn: &Connection, id: i64) -> User {
    let users = SqliteUserRepository::try_new(conn).unwrap();
    users.find_by_id(id).unwrap().unwrap()
}

#[test]
fn developer_assignment_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    seed_project(&conn, 10, "Apollo");
    let users = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let user = users
        .create(&User::new("a@x.com", "Ada", "Lovelace", Role::Developer))
        .unwrap();
    assert_eq!(user.id, Some(1));
    let service = assignment_service(&conn);

    service.assign_project_to_developer(10, 1).unwrap();
    assert_eq!(reload(&conn, 1).developer_projects, BTreeSet::from([10]));

    service.assign_project_to_developer(10, 1).unwrap();
    let loaded = reload(&conn, 1);
    assert_eq!(loaded.developer_projects, BTreeSet::from([10]));
    assert!(loaded.scrum_projects.is_empty());
}

#[test]
fn developer_assignment_rejects_other_roles_without_mutation() {
    let conn = open_db_in_memory().unwrap();
    seed_project(&conn, 10, "Apollo");
    let user = seed_user(&conn, "j@x.com", "Jane", "Doe", Role::ScrumMaster);
    let id = user.id.unwrap();
    let service = assignment_service(&conn);

    let err = service.assign_project_to_developer(10, id).unwrap_err();
    assert!(matches!(err, ServiceError::RoleMismatch(_)));
    assert_eq!(err.to_string(), "User Must be Developer Role");

    let loaded = reload(&conn, id);
    assert!(loaded.developer_projects.is_empty());
    assert!(loaded.scrum_projects.is_empty());
}

#[test]
fn developer_assignment_checks_project_before_user() {
    let conn = open_db_in_memory().unwrap();
    let service = assignment_service(&conn);

    let err = service.assign_project_to_developer(10, 99).unwrap_err();
    assert_eq!(err.to_string(), "No Project with ID: 10");

    seed_project(&conn, 10, "Apollo");
    let err = service.assign_project_to_developer(10, 99).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "No Developer with ID: 99");
}

#[test]
fn developer_assignment_accumulates_distinct_projects() {
    let conn = open_db_in_memory().unwrap();
    seed_project(&conn, 10, "Apollo");
    seed_project(&conn, 11, "Gemini");
    let id = seed_user(&conn, "a@x.com", "Ada", "Lovelace", Role::Developer)
        .id
        .unwrap();
    let service = assignment_service(&conn);

    service.assign_project_to_developer(11, id).unwrap();
    service.assign_project_to_developer(10, id).unwrap();
    assert_eq!(reload(&conn, id).developer_projects, BTreeSet::from([10, 11]));
}

#[test]
fn scrum_master_assignment_ignores_role() {
    let conn = open_db_in_memory().unwrap();
    seed_project(&conn, 10, "Apollo");
    let id = seed_user(&conn, "j@x.com", "Jane", "Doe", Role::Developer)
        .id
        .unwrap();
    let service = assignment_service(&conn);

    service
        .assign_project_to_scrum_master(10, "Jane", "Doe")
        .unwrap();
    service
        .assign_project_to_scrum_master(10, "Jane", "Doe")
        .unwrap();

    let loaded = reload(&conn, id);
    assert_eq!(loaded.scrum_projects, BTreeSet::from([10]));
    assert!(loaded.developer_projects.is_empty());
    assert_eq!(loaded.role, Role::Developer);
}

#[test]
fn scrum_master_assignment_checks_user_before_project() {
    let conn = open_db_in_memory().unwrap();
    let service = assignment_service(&conn);

    let err = service
        .assign_project_to_scrum_master(10, "Jane", "Doe")
        .unwrap_err();
    assert_eq!(err.to_string(), "No User found named Jane Doe");

    seed_user(&conn, "j@x.com", "Jane", "Doe", Role::ScrumMaster);
    let err = service
        .assign_project_to_scrum_master(10, "Jane", "Doe")
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "No Project found With Id 10");
}

#[test]
fn assignments_keep_developer_and_scrum_sets_independent() {
    let conn = open_db_in_memory().unwrap();
    seed_project(&conn, 10, "Apollo");
    seed_project(&conn, 20, "Gemini");
    let id = seed_user(&conn, "a@x.com", "Ada", "Lovelace", Role::Developer)
        .id
        .unwrap();
    let service = assignment_service(&conn);

    service.assign_project_to_developer(10, id).unwrap();
    service
        .assign_project_to_scrum_master(20, "Ada", "Lovelace")
        .unwrap();

    let loaded = reload(&conn, id);
    assert_eq!(loaded.developer_projects, BTreeSet::from([10]));
    assert_eq!(loaded.scrum_projects, BTreeSet::from([20]));

    let projects = SqliteProjectRepository::try_new(&conn).unwrap();
    assert_eq!(projects.find_all().unwrap().len(), 2);
}
