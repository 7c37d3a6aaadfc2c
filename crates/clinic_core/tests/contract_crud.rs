use clinic_core::db::migrations::latest_version;
use clinic_core::db::open_db_in_memory;
use clinic_core::{Contract, ContractRepository, RepoError, SqliteContractRepository};
use rusqlite::Connection;

fn insert_vet(conn: &Connection, name: &str) -> i64 {
    conn.execute(
        "INSERT INTO vets (name, surname, hired_on) VALUES (?1, 'Serrano', '2023-06-01');",
        [name],
    )
    .unwrap();
    conn.last_insert_rowid()
}

#[test]
fn create_and_read_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContractRepository::try_new(&conn).unwrap();
    let vet_id = insert_vet(&conn, "Ana");

    let mut contract = Contract::new("surgeon", 42_000.0, 37.5);
    contract.set_vet_id(vet_id);
    repo.create(&contract).unwrap();

    let loaded = repo.read_by_vet_id(vet_id).unwrap().unwrap();
    assert_eq!(loaded.vet_id(), vet_id);
    assert_eq!(loaded.position(), "surgeon");
    assert_eq!(loaded.base_salary(), 42_000.0);
    assert_eq!(loaded.weekly_hours(), 37.5);
}

#[test]
fn read_missing_contract_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContractRepository::try_new(&conn).unwrap();

    assert!(repo.read_by_vet_id(999).unwrap().is_none());
}

#[test]
fn duplicate_create_for_same_vet_is_a_constraint_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContractRepository::try_new(&conn).unwrap();
    let vet_id = insert_vet(&conn, "Ana");

    let mut contract = Contract::new("surgeon", 42_000.0, 37.5);
    contract.set_vet_id(vet_id);
    repo.create(&contract).unwrap();

    let err = repo.create(&contract).unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));
}

#[test]
fn create_for_missing_vet_is_a_constraint_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContractRepository::try_new(&conn).unwrap();

    let mut contract = Contract::new("surgeon", 42_000.0, 37.5);
    contract.set_vet_id(12345);

    let err = repo.create(&contract).unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));
}

#[test]
fn update_existing_contract_reports_true_and_missing_reports_false() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContractRepository::try_new(&conn).unwrap();
    let vet_id = insert_vet(&conn, "Ana");

    let mut contract = Contract::new("assistant", 21_000.0, 20.0);
    contract.set_vet_id(vet_id);
    repo.create(&contract).unwrap();

    contract.set_position("head surgeon");
    contract.set_base_salary(55_000.0);
    assert!(repo.update(&contract).unwrap());

    let loaded = repo.read_by_vet_id(vet_id).unwrap().unwrap();
    assert_eq!(loaded.position(), "head surgeon");
    assert_eq!(loaded.base_salary(), 55_000.0);

    let mut unattached = Contract::new("ghost", 1.0, 1.0);
    unattached.set_vet_id(999);
    assert!(!repo.update(&unattached).unwrap());
}

#[test]
fn delete_reports_whether_a_row_was_removed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContractRepository::try_new(&conn).unwrap();
    let vet_id = insert_vet(&conn, "Ana");

    let mut contract = Contract::new("surgeon", 42_000.0, 37.5);
    contract.set_vet_id(vet_id);
    repo.create(&contract).unwrap();

    assert!(repo.delete(vet_id).unwrap());
    assert!(!repo.delete(vet_id).unwrap());
    assert!(repo.read_by_vet_id(vet_id).unwrap().is_none());
}

#[test]
fn read_all_returns_contracts_ordered_by_vet_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContractRepository::try_new(&conn).unwrap();
    let first_vet = insert_vet(&conn, "Ana");
    let second_vet = insert_vet(&conn, "Berta");

    let mut second = Contract::new("assistant", 21_000.0, 20.0);
    second.set_vet_id(second_vet);
    repo.create(&second).unwrap();

    let mut first = Contract::new("surgeon", 42_000.0, 37.5);
    first.set_vet_id(first_vet);
    repo.create(&first).unwrap();

    let all = repo.read_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].vet_id(), first_vet);
    assert_eq!(all[1].vet_id(), second_vet);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteContractRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_contracts_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteContractRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("contracts"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_contracts_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE contracts (
            vet_id INTEGER PRIMARY KEY,
            position TEXT,
            base_salary REAL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteContractRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "contracts",
            column: "weekly_hours"
        })
    ));
}
