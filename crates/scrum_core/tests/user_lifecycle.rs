use scrum_core::db::open_db_in_memory;
use scrum_core::{
    Crud, RepoError, Role, ServiceError, SqliteUserRepository, User, UserRepository,
    UserService, UserSummary, ValidationError,
};

#[test]
fn create_then_get_returns_equivalent_record() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    let input = User::new("a@x.com", "Ada", "Lovelace", Role::Developer);
    let created = service.create(&input).unwrap();
    assert_eq!(created.id, Some(1));

    let loaded = service.get(1).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.email, input.email);
    assert_eq!(loaded.role, input.role);
}

#[test]
fn create_with_taken_email_is_a_conflict_and_persists_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    service
        .create(&User::new("a@x.com", "Ada", "Lovelace", Role::Developer))
        .unwrap();

    let err = service
        .create(&User::new("a@x.com", "Alan", "Turing", Role::ScrumMaster))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(err.to_string(), "Email is taken, try another Email!");
    assert_eq!(service.get_all_users().unwrap().len(), 1);
}

#[test]
fn create_ignores_caller_supplied_id() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let ada = service
        .create(&User::new("a@x.com", "Ada", "Lovelace", Role::Developer))
        .unwrap();

    let mut intruder = User::new("b@x.com", "Alan", "Turing", Role::ScrumMaster);
    intruder.id = ada.id;
    let created = service.create(&intruder).unwrap();

    assert_ne!(created.id, ada.id);
    assert_eq!(service.get_all_users().unwrap().len(), 2);
    assert_eq!(service.get(ada.id.unwrap()).unwrap(), ada);
}

#[test]
fn create_rejects_email_with_surrounding_whitespace() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    service
        .create(&User::new("a@x.com", "Ada", "Lovelace", Role::Developer))
        .unwrap();

    let err = service
        .create(&User::new(" a@x.com ", "Ada", "Lovelace", Role::Developer))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::Validation(ValidationError::InvalidEmail(_)))
    ));
    assert_eq!(service.get_all_users().unwrap().len(), 1);
}

#[test]
fn get_missing_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    let err = service.get(42).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("42"));
}

#[test]
fn update_overwrites_without_rechecking_email() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    service
        .create(&User::new("a@x.com", "Ada", "Lovelace", Role::Developer))
        .unwrap();
    let mut other = service
        .create(&User::new("b@x.com", "Alan", "Turing", Role::Developer))
        .unwrap();

    other.email = "a@x.com".to_string();
    other.role = Role::ProductOwner;
    let updated = service.update(Some(&other)).unwrap().unwrap();
    assert_eq!(updated, other);

    let loaded = service.get(other.id.unwrap()).unwrap();
    assert_eq!(loaded.email, "a@x.com");
    assert_eq!(loaded.role, Role::ProductOwner);
}

#[test]
fn update_none_is_a_silent_no_op() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    assert_eq!(service.update(None).unwrap(), None);
    assert!(service.get_all_users().unwrap().is_empty());
}

#[test]
fn delete_existing_user_succeeds_and_missing_user_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let created = service
        .create(&User::new("a@x.com", "Ada", "Lovelace", Role::Developer))
        .unwrap();
    let id = created.id.unwrap();

    service.delete(id).unwrap();
    assert!(service.get(id).unwrap_err().is_not_found());

    let err = service.delete(id).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), format!("No User With ID: {id}"));
}

#[test]
fn get_all_users_projects_summaries_in_store_order() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let ada = service
        .create(&User::new("a@x.com", "Ada", "Lovelace", Role::Developer))
        .unwrap();
    let jane = service
        .create(&User::new("j@x.com", "Jane", "Doe", Role::ScrumMaster))
        .unwrap();

    let summaries = service.get_all_users().unwrap();
    assert_eq!(
        summaries,
        vec![UserSummary::from(&ada), UserSummary::from(&jane)]
    );
    assert_eq!(summaries[1].first_name, "Jane");
    assert_eq!(summaries[1].role, Role::ScrumMaster);
}

#[test]
fn find_user_by_email_returns_summary_or_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let jane = service
        .create(&User::new("j@x.com", "Jane", "Doe", Role::ScrumMaster))
        .unwrap();

    let summary = service.find_user_by_email("j@x.com").unwrap();
    assert_eq!(summary.id, jane.id);
    assert_eq!(summary.email, "j@x.com");

    let err = service.find_user_by_email("missing@x.com").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn crud_trait_drives_the_same_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let service = UserService::new(repo);

    let crud: &dyn Crud<User, Id = i64> = &service;
    let created = crud
        .create(&User::new("a@x.com", "Ada", "Lovelace", Role::Developer))
        .unwrap();
    let id = created.id.unwrap();
    assert_eq!(crud.get(id).unwrap(), created);
    assert_eq!(crud.update(None).unwrap(), None);
    crud.delete(id).unwrap();

    let check = SqliteUserRepository::try_new(&conn).unwrap();
    assert!(check.find_by_id(id).unwrap().is_none());
}
