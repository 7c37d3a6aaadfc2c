//! Vet aggregate repository: cascading CRUD for the whole object graph.
//!
//! # Responsibility
//! - Compose contract and certification session-scoped calls inside one
//!   immediate transaction per operation.
//! - Reconcile placeholder certification keys with server-generated ids
//!   immediately after the corresponding insert.
//!
//! # Invariants
//! - Mutating operations are all-or-nothing: any failure rolls the whole
//!   transaction back before the error reaches the caller.
//! - After a successful create, the vet id and every certification id are
//!   server-assigned and the collection holds no placeholder keys.
//! - `update` reconciles the contract (orphan removal / upsert) but leaves
//!   the certification collection to the caller; certification changes go
//!   through `CertificationRepository` directly.

use crate::model::vet::{Vet, VetId};
use crate::repo::{certification_repo, contract_repo, ensure_connection_ready, RepoResult};
use crate::repo::RepoError;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const VET_SELECT_SQL: &str = "SELECT
    id,
    name,
    surname,
    hired_on
FROM vets";

/// Repository interface for whole-aggregate operations.
pub trait VetRepository {
    /// Inserts the vet, its contract and its placeholder-keyed
    /// certifications in one transaction; returns the generated vet id.
    ///
    /// On failure the in-memory identifiers are indeterminate and must not
    /// be trusted until the aggregate is re-read.
    fn create(&self, vet: &mut Vet) -> RepoResult<VetId>;
    /// Loads the vet row, its optional contract and its certification ids
    /// (as not-yet-loaded entries). Absent vet yields `None`.
    fn read_by_id(&self, id: VetId) -> RepoResult<Option<Vet>>;
    /// Loads every aggregate in the store.
    fn read_all(&self) -> RepoResult<Vec<Vet>>;
    /// Updates vet scalars and reconciles the contract; returns whether the
    /// vet row itself was affected. When no vet row matches, the contract is
    /// left alone and the result is `false`.
    fn update(&self, vet: &Vet) -> RepoResult<bool>;
    /// Deletes certifications, contract and vet row in one transaction;
    /// returns whether the vet row was removed.
    fn delete(&self, id: VetId) -> RepoResult<bool>;
    /// Materializes not-yet-loaded certification entries, querying only
    /// unresolved ids.
    fn load_certifications(&self, vet: &mut Vet) -> RepoResult<()>;
}

/// SQLite-backed vet aggregate repository.
pub struct SqliteVetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVetRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                ("vets", &["id", "name", "surname", "hired_on"]),
                (
                    "contracts",
                    &["vet_id", "position", "base_salary", "weekly_hours"],
                ),
                ("certifications", &["id", "vet_id", "specialty", "issued_by"]),
            ],
        )?;
        Ok(Self { conn })
    }
}

impl VetRepository for SqliteVetRepository<'_> {
    fn create(&self, vet: &mut Vet) -> RepoResult<VetId> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO vets (name, surname, hired_on) VALUES (?1, ?2, ?3);",
            params![vet.name(), vet.surname(), vet.hired_on()],
        )?;
        let vet_id = tx.last_insert_rowid();
        vet.set_id(vet_id);

        if let Some(contract) = vet.contract_mut() {
            contract.set_vet_id(vet_id);
            contract_repo::create_contract_tx(&tx, contract)?;
        }

        // Cascade-insert pending children, swapping each placeholder key
        // for the generated id before the next read of the collection.
        for (_placeholder, mut certification) in vet.take_unpersisted_certifications() {
            certification.set_vet_id(vet_id);
            certification_repo::create_certification_tx(&tx, &mut certification)?;
            vet.put_certification(certification);
        }

        tx.commit()?;
        Ok(vet_id)
    }

    fn read_by_id(&self, id: VetId) -> RepoResult<Option<Vet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VET_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let mut vet = map_vet_row(row)?;
        load_aggregate_parts(self.conn, &mut vet)?;
        Ok(Some(vet))
    }

    fn read_all(&self) -> RepoResult<Vec<Vet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VET_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut vets = Vec::new();
        while let Some(row) = rows.next()? {
            vets.push(map_vet_row(row)?);
        }

        for vet in &mut vets {
            load_aggregate_parts(self.conn, vet)?;
        }
        Ok(vets)
    }

    fn update(&self, vet: &Vet) -> RepoResult<bool> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let changed = tx.execute(
            "UPDATE vets SET name = ?1, surname = ?2, hired_on = ?3 WHERE id = ?4;",
            params![vet.name(), vet.surname(), vet.hired_on(), vet.id()],
        )? > 0;

        // Contract reconciliation only makes sense against an existing vet
        // row; a missing vet must come back as a plain `false`.
        if changed {
            match vet.contract() {
                None => {
                    // Orphan removal: a cleared in-memory contract drops the
                    // row.
                    contract_repo::delete_contract_tx(&tx, vet.id())?;
                }
                Some(contract) => {
                    let mut owned = contract.clone();
                    owned.set_vet_id(vet.id());
                    if !contract_repo::update_contract_tx(&tx, &owned)? {
                        // No existing row: fall back to insert (upsert).
                        contract_repo::create_contract_tx(&tx, &owned)?;
                    }
                }
            }
        }

        tx.commit()?;
        Ok(changed)
    }

    fn delete(&self, id: VetId) -> RepoResult<bool> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        // The store carries no ON DELETE CASCADE; children go first.
        certification_repo::delete_certifications_by_vet_tx(&tx, id)?;
        contract_repo::delete_contract_tx(&tx, id)?;
        let removed = tx.execute("DELETE FROM vets WHERE id = ?1;", [id])? > 0;

        if removed {
            tx.commit()?;
        }
        Ok(removed)
    }

    fn load_certifications(&self, vet: &mut Vet) -> RepoResult<()> {
        for id in vet.unresolved_certification_ids() {
            if let Some(certification) = certification_repo::read_certification(self.conn, id)? {
                vet.resolve_certification(id, certification);
            }
        }
        Ok(())
    }
}

fn load_aggregate_parts(conn: &Connection, vet: &mut Vet) -> RepoResult<()> {
    vet.set_contract(contract_repo::read_contract(conn, vet.id())?);

    let mut stmt =
        conn.prepare("SELECT id FROM certifications WHERE vet_id = ?1 ORDER BY id ASC;")?;
    let mut rows = stmt.query([vet.id()])?;
    while let Some(row) = rows.next()? {
        vet.attach_certification(row.get(0)?);
    }
    Ok(())
}

/// Maps one vet row through the model's normalizing setters.
fn map_vet_row(row: &Row<'_>) -> RepoResult<Vet> {
    let id: i64 = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid id value `{id}` in vets.id"
        )));
    }

    let name: String = row.get("name")?;
    let surname: String = row.get("surname")?;
    let hired_on: String = row.get("hired_on")?;
    let mut vet = Vet::new(name, surname, hired_on);
    vet.set_id(id);
    Ok(vet)
}
