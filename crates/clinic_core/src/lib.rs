//! Core domain logic for the clinic staff registry.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::certification::{Certification, CertificationId};
pub use model::contract::{Contract, MAX_WEEKLY_HOURS};
pub use model::vet::{CertificationSlot, Vet, VetId};
pub use repo::certification_repo::{CertificationRepository, SqliteCertificationRepository};
pub use repo::contract_repo::{ContractRepository, SqliteContractRepository};
pub use repo::vet_repo::{SqliteVetRepository, VetRepository};
pub use repo::{RepoError, RepoResult};
pub use service::vet_service::{ServiceError, VetService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
