use appraisal_core::db::open_db_in_memory;
use appraisal_core::{
    Employee, RepoError, ReviewRepository, SqliteEmployeeRepository, SqliteReviewRepository,
};
use rusqlite::Connection;
use std::rc::Rc;

fn setup_tables(conn: &Connection) {
    SqliteEmployeeRepository::new(conn).create_table().unwrap();
    SqliteReviewRepository::new(conn).create_table().unwrap();
}

#[test]
fn reviews_returns_only_this_employees_rows() {
    let conn = open_db_in_memory().unwrap();
    setup_tables(&conn);
    let employees = SqliteEmployeeRepository::new(&conn);
    let repo = SqliteReviewRepository::new(&conn);

    let ada = employees.create("Ada Park").unwrap();
    let ben = employees.create("Ben Okafor").unwrap();

    repo.create(2022, "Ramped up fast", ada.id().unwrap()).unwrap();
    repo.create(2023, "Led the storage rewrite", ada.id().unwrap())
        .unwrap();
    repo.create(2023, "Joined mid-year", ben.id().unwrap()).unwrap();

    let ada_reviews = ada.reviews(&repo).unwrap();
    assert_eq!(ada_reviews.len(), 2);
    assert_eq!(ada_reviews[0].borrow().summary(), "Ramped up fast");
    assert_eq!(ada_reviews[1].borrow().summary(), "Led the storage rewrite");
    for review in &ada_reviews {
        assert_eq!(review.borrow().employee_id(), ada.id().unwrap());
    }

    assert_eq!(ben.reviews(&repo).unwrap().len(), 1);
}

#[test]
fn reviews_resolve_through_the_identity_cache() {
    let conn = open_db_in_memory().unwrap();
    setup_tables(&conn);
    let employees = SqliteEmployeeRepository::new(&conn);
    let repo = SqliteReviewRepository::new(&conn);

    let ada = employees.create("Ada Park").unwrap();
    let created = repo.create(2024, "Promoted", ada.id().unwrap()).unwrap();

    let listed = ada.reviews(&repo).unwrap();
    assert_eq!(listed.len(), 1);
    assert!(Rc::ptr_eq(&listed[0], &created));

    let found = repo
        .find_by_id(created.borrow().id().unwrap())
        .unwrap()
        .unwrap();
    assert!(Rc::ptr_eq(&listed[0], &found));
}

#[test]
fn reviews_is_empty_for_an_unreviewed_employee() {
    let conn = open_db_in_memory().unwrap();
    setup_tables(&conn);
    let employees = SqliteEmployeeRepository::new(&conn);
    let repo = SqliteReviewRepository::new(&conn);

    let ada = employees.create("Ada Park").unwrap();
    assert!(ada.reviews(&repo).unwrap().is_empty());
}

#[test]
fn reviews_on_an_unsaved_employee_fails() {
    let conn = open_db_in_memory().unwrap();
    setup_tables(&conn);
    let repo = SqliteReviewRepository::new(&conn);

    let ghost = Employee::new("Never hired");
    let err = ghost.reviews(&repo).unwrap_err();
    assert!(matches!(err, RepoError::NotPersisted));
}

#[test]
fn employee_find_by_id_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    setup_tables(&conn);
    let employees = SqliteEmployeeRepository::new(&conn);

    let ada = employees.create("Ada Park").unwrap();
    let found = employees.find_by_id(ada.id().unwrap()).unwrap().unwrap();
    assert_eq!(found, ada);

    assert!(employees.find_by_id(404).unwrap().is_none());
}
