//! Certification repository: CRUD for the 1:N children owned by a vet.
//!
//! # Responsibility
//! - Standalone operations run in SQLite autocommit on the borrowed
//!   connection.
//! - `*_tx` variants participate in a caller-supplied transaction for the
//!   aggregate cascade.
//!
//! # Invariants
//! - `create` populates the certification's server-generated id on success.
//! - A dangling `vet_id` or blank specialty is rejected by the store and
//!   surfaces as `RepoError::Constraint`.

use crate::model::certification::{Certification, CertificationId};
use crate::model::vet::VetId;
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, Row, Transaction};

const CERTIFICATION_SELECT_SQL: &str = "SELECT
    id,
    vet_id,
    specialty,
    issued_by
FROM certifications";

/// Repository interface for certification operations.
pub trait CertificationRepository {
    /// Single-row lookup by the certification's own id.
    fn read_by_id(&self, id: CertificationId) -> RepoResult<Option<Certification>>;
    /// Unfiltered scan; empty when no rows exist.
    fn read_all(&self) -> RepoResult<Vec<Certification>>;
    /// All certifications whose foreign key matches; empty if none.
    fn read_by_vet_id(&self, vet_id: VetId) -> RepoResult<Vec<Certification>>;
    /// Inserts and populates `certification.id()` with the generated value.
    fn create(&self, certification: &mut Certification) -> RepoResult<CertificationId>;
    /// Updates scalar columns; returns whether any row was affected.
    fn update(&self, certification: &Certification) -> RepoResult<bool>;
    /// Deletes by id; returns whether a row was removed.
    fn delete(&self, id: CertificationId) -> RepoResult<bool>;
    /// Deletes every certification owned by one vet; returns the count.
    fn delete_by_vet_id(&self, vet_id: VetId) -> RepoResult<usize>;
}

/// SQLite-backed certification repository.
pub struct SqliteCertificationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCertificationRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[("certifications", &["id", "vet_id", "specialty", "issued_by"])],
        )?;
        Ok(Self { conn })
    }
}

impl CertificationRepository for SqliteCertificationRepository<'_> {
    fn read_by_id(&self, id: CertificationId) -> RepoResult<Option<Certification>> {
        read_certification(self.conn, id)
    }

    fn read_all(&self) -> RepoResult<Vec<Certification>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CERTIFICATION_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut certifications = Vec::new();
        while let Some(row) = rows.next()? {
            certifications.push(map_certification_row(row)?);
        }
        Ok(certifications)
    }

    fn read_by_vet_id(&self, vet_id: VetId) -> RepoResult<Vec<Certification>> {
        read_certifications_by_vet(self.conn, vet_id)
    }

    fn create(&self, certification: &mut Certification) -> RepoResult<CertificationId> {
        insert_certification(self.conn, certification)
    }

    fn update(&self, certification: &Certification) -> RepoResult<bool> {
        update_certification(self.conn, certification)
    }

    fn delete(&self, id: CertificationId) -> RepoResult<bool> {
        delete_certification(self.conn, id)
    }

    fn delete_by_vet_id(&self, vet_id: VetId) -> RepoResult<usize> {
        delete_certifications_by_vet(self.conn, vet_id)
    }
}

/// Session-scoped create; populates the generated id.
pub fn create_certification_tx(
    tx: &Transaction<'_>,
    certification: &mut Certification,
) -> RepoResult<CertificationId> {
    insert_certification(tx, certification)
}

/// Session-scoped update.
pub fn update_certification_tx(
    tx: &Transaction<'_>,
    certification: &Certification,
) -> RepoResult<bool> {
    update_certification(tx, certification)
}

/// Session-scoped delete by id.
pub fn delete_certification_tx(tx: &Transaction<'_>, id: CertificationId) -> RepoResult<bool> {
    delete_certification(tx, id)
}

/// Session-scoped cascade helper: removes every child of one vet.
pub fn delete_certifications_by_vet_tx(tx: &Transaction<'_>, vet_id: VetId) -> RepoResult<usize> {
    delete_certifications_by_vet(tx, vet_id)
}

pub(crate) fn read_certification(
    conn: &Connection,
    id: CertificationId,
) -> RepoResult<Option<Certification>> {
    let mut stmt = conn.prepare(&format!("{CERTIFICATION_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(map_certification_row(row)?));
    }
    Ok(None)
}

pub(crate) fn read_certifications_by_vet(
    conn: &Connection,
    vet_id: VetId,
) -> RepoResult<Vec<Certification>> {
    let mut stmt = conn.prepare(&format!(
        "{CERTIFICATION_SELECT_SQL} WHERE vet_id = ?1 ORDER BY id ASC;"
    ))?;
    let mut rows = stmt.query([vet_id])?;
    let mut certifications = Vec::new();
    while let Some(row) = rows.next()? {
        certifications.push(map_certification_row(row)?);
    }
    Ok(certifications)
}

fn insert_certification(
    conn: &Connection,
    certification: &mut Certification,
) -> RepoResult<CertificationId> {
    conn.execute(
        "INSERT INTO certifications (vet_id, specialty, issued_by)
         VALUES (?1, ?2, ?3);",
        params![
            certification.vet_id(),
            certification.specialty(),
            certification.issued_by(),
        ],
    )?;
    certification.set_id(conn.last_insert_rowid());
    Ok(certification.id())
}

fn update_certification(conn: &Connection, certification: &Certification) -> RepoResult<bool> {
    let changed = conn.execute(
        "UPDATE certifications
         SET vet_id = ?1, specialty = ?2, issued_by = ?3
         WHERE id = ?4;",
        params![
            certification.vet_id(),
            certification.specialty(),
            certification.issued_by(),
            certification.id(),
        ],
    )?;
    Ok(changed > 0)
}

fn delete_certification(conn: &Connection, id: CertificationId) -> RepoResult<bool> {
    let removed = conn.execute("DELETE FROM certifications WHERE id = ?1;", [id])?;
    Ok(removed > 0)
}

fn delete_certifications_by_vet(conn: &Connection, vet_id: VetId) -> RepoResult<usize> {
    let removed = conn.execute("DELETE FROM certifications WHERE vet_id = ?1;", [vet_id])?;
    Ok(removed)
}

/// Maps one row through the model's normalizing setters.
fn map_certification_row(row: &Row<'_>) -> RepoResult<Certification> {
    let specialty: String = row.get("specialty")?;
    let issued_by: String = row.get("issued_by")?;
    let mut certification = Certification::new(specialty, issued_by);
    certification.set_id(row.get("id")?);
    certification.set_vet_id(row.get("vet_id")?);
    Ok(certification)
}
