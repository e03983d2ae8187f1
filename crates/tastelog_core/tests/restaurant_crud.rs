use rusqlite::Connection;
use tastelog_core::db::migrations::latest_version;
use tastelog_core::db::open_db_in_memory;
use tastelog_core::{
    RepoError, Restaurant, RestaurantDraft, RestaurantRepository, RestaurantService,
    SqliteRestaurantRepository,
};

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();

    let id = repo
        .create(&RestaurantDraft::new("Kimchi House", 4.6))
        .unwrap();

    let loaded = repo.get(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Kimchi House");
    assert_eq!(loaded.score, 4.6);
}

#[test]
fn ids_follow_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();

    let first = repo.create(&RestaurantDraft::new("First", 3.0)).unwrap();
    let second = repo.create(&RestaurantDraft::new("Second", 4.0)).unwrap();
    assert_eq!(first, 1);
    assert_eq!(second, 2);

    let listed = repo.list().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "First");
    assert_eq!(listed[1].name, "Second");
}

#[test]
fn list_on_empty_table_returns_no_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();

    assert!(repo.list().unwrap().is_empty());
    assert!(repo.scores().unwrap().is_empty());
}

#[test]
fn update_existing_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();

    let id = repo.create(&RestaurantDraft::new("Draft", 2.0)).unwrap();

    let updated = Restaurant {
        id,
        name: "Renamed".to_string(),
        score: 4.5,
    };
    repo.update(&updated).unwrap();

    let loaded = repo.get(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Renamed");
    assert_eq!(loaded.score, 4.5);
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();

    let missing = Restaurant {
        id: 99,
        name: "Missing".to_string(),
        score: 3.0,
    };
    let err = repo.update(&missing).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));
}

#[test]
fn delete_removes_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();

    let id = repo.create(&RestaurantDraft::new("Short Lived", 3.3)).unwrap();
    repo.delete(id).unwrap();

    assert!(repo.get(id).unwrap().is_none());
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn delete_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();

    let err = repo.delete(42).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();

    let create_err = repo.create(&RestaurantDraft::new("X", 0.5)).unwrap_err();
    assert!(matches!(create_err, RepoError::Validation(_)));

    let create_err = repo.create(&RestaurantDraft::new("  ", 3.0)).unwrap_err();
    assert!(matches!(create_err, RepoError::Validation(_)));

    let id = repo.create(&RestaurantDraft::new("Valid", 3.0)).unwrap();
    let invalid = Restaurant {
        id,
        name: "Valid".to_string(),
        score: 5.5,
    };
    let update_err = repo.update(&invalid).unwrap_err();
    assert!(matches!(update_err, RepoError::Validation(_)));
}

#[test]
fn scores_follow_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();

    repo.create(&RestaurantDraft::new("A", 4.6)).unwrap();
    repo.create(&RestaurantDraft::new("B", 1.0)).unwrap();
    repo.create(&RestaurantDraft::new("C", 3.2)).unwrap();

    assert_eq!(repo.scores().unwrap(), vec![4.6, 1.0, 3.2]);
}

#[test]
fn service_rounds_scores_before_persisting() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();
    let service = RestaurantService::new(repo);

    let id = service.register("Kimchi House", 4.55).unwrap();

    let loaded = service.get(id).unwrap().unwrap();
    assert_eq!(loaded.score, 4.6);
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn storage_check_constraint_rejects_out_of_band_writes() {
    let conn = open_db_in_memory().unwrap();

    let result = conn.execute(
        "INSERT INTO restaurants (name, score) VALUES ('Sneaky', 9.0);",
        [],
    );
    assert!(result.is_err(), "CHECK constraint should reject score 9.0");
}

#[test]
fn read_back_rejects_invalid_persisted_score() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    conn.execute(
        "INSERT INTO restaurants (name, score) VALUES ('Corrupt', 9.0);",
        [],
    )
    .unwrap();

    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();
    let err = repo.get(1).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteRestaurantRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteRestaurantRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("restaurants"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE restaurants (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteRestaurantRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "restaurants",
            column: "score"
        })
    ));
}
