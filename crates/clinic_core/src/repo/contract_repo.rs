//! Contract repository: CRUD for the 1:1 dependent keyed by the vet's id.
//!
//! # Responsibility
//! - Standalone operations run in SQLite autocommit on the borrowed
//!   connection.
//! - `*_tx` variants participate in a caller-supplied transaction; the
//!   aggregate repository uses them so it alone controls commit/rollback.
//!
//! # Invariants
//! - The row key is the owning vet's id; duplicate creates and dangling
//!   foreign keys surface as `RepoError::Constraint`.
//! - "No such contract" is a `false`/`None` outcome, never an error.

use crate::model::contract::Contract;
use crate::model::vet::VetId;
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, Row, Transaction};

const CONTRACT_SELECT_SQL: &str = "SELECT
    vet_id,
    position,
    base_salary,
    weekly_hours
FROM contracts";

/// Repository interface for contract operations.
pub trait ContractRepository {
    /// Single-row lookup by shared key; absent is not an error.
    fn read_by_vet_id(&self, vet_id: VetId) -> RepoResult<Option<Contract>>;
    /// Unfiltered scan; empty when no rows exist.
    fn read_all(&self) -> RepoResult<Vec<Contract>>;
    /// Inserts the row keyed by `contract.vet_id()`.
    fn create(&self, contract: &Contract) -> RepoResult<()>;
    /// Updates scalar columns; returns whether any row was affected.
    fn update(&self, contract: &Contract) -> RepoResult<bool>;
    /// Deletes by shared key; returns whether a row was removed.
    fn delete(&self, vet_id: VetId) -> RepoResult<bool>;
}

/// SQLite-backed contract repository.
pub struct SqliteContractRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContractRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[(
                "contracts",
                &["vet_id", "position", "base_salary", "weekly_hours"],
            )],
        )?;
        Ok(Self { conn })
    }
}

impl ContractRepository for SqliteContractRepository<'_> {
    fn read_by_vet_id(&self, vet_id: VetId) -> RepoResult<Option<Contract>> {
        read_contract(self.conn, vet_id)
    }

    fn read_all(&self) -> RepoResult<Vec<Contract>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTRACT_SELECT_SQL} ORDER BY vet_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contracts = Vec::new();
        while let Some(row) = rows.next()? {
            contracts.push(map_contract_row(row)?);
        }
        Ok(contracts)
    }

    fn create(&self, contract: &Contract) -> RepoResult<()> {
        insert_contract(self.conn, contract)
    }

    fn update(&self, contract: &Contract) -> RepoResult<bool> {
        update_contract(self.conn, contract)
    }

    fn delete(&self, vet_id: VetId) -> RepoResult<bool> {
        delete_contract(self.conn, vet_id)
    }
}

/// Session-scoped create participating in the caller's transaction.
pub fn create_contract_tx(tx: &Transaction<'_>, contract: &Contract) -> RepoResult<()> {
    insert_contract(tx, contract)
}

/// Session-scoped update participating in the caller's transaction.
pub fn update_contract_tx(tx: &Transaction<'_>, contract: &Contract) -> RepoResult<bool> {
    update_contract(tx, contract)
}

/// Session-scoped delete participating in the caller's transaction.
pub fn delete_contract_tx(tx: &Transaction<'_>, vet_id: VetId) -> RepoResult<bool> {
    delete_contract(tx, vet_id)
}

pub(crate) fn read_contract(conn: &Connection, vet_id: VetId) -> RepoResult<Option<Contract>> {
    let mut stmt = conn.prepare(&format!("{CONTRACT_SELECT_SQL} WHERE vet_id = ?1;"))?;
    let mut rows = stmt.query([vet_id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(map_contract_row(row)?));
    }
    Ok(None)
}

fn insert_contract(conn: &Connection, contract: &Contract) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO contracts (vet_id, position, base_salary, weekly_hours)
         VALUES (?1, ?2, ?3, ?4);",
        params![
            contract.vet_id(),
            contract.position(),
            contract.base_salary(),
            contract.weekly_hours(),
        ],
    )?;
    Ok(())
}

fn update_contract(conn: &Connection, contract: &Contract) -> RepoResult<bool> {
    let changed = conn.execute(
        "UPDATE contracts
         SET position = ?1, base_salary = ?2, weekly_hours = ?3
         WHERE vet_id = ?4;",
        params![
            contract.position(),
            contract.base_salary(),
            contract.weekly_hours(),
            contract.vet_id(),
        ],
    )?;
    Ok(changed > 0)
}

fn delete_contract(conn: &Connection, vet_id: VetId) -> RepoResult<bool> {
    let removed = conn.execute("DELETE FROM contracts WHERE vet_id = ?1;", [vet_id])?;
    Ok(removed > 0)
}

/// Maps one row through the same normalizing setters the model enforces.
fn map_contract_row(row: &Row<'_>) -> RepoResult<Contract> {
    let position: String = row.get("position")?;
    let mut contract = Contract::new(
        position,
        row.get("base_salary")?,
        row.get("weekly_hours")?,
    );
    contract.set_vet_id(row.get("vet_id")?);
    Ok(contract)
}
