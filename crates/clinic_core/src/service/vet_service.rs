//! Vet registry use-case service.
//!
//! # Responsibility
//! - Validate use-case input above the repository layer.
//! - Provide register, lookup, update and removal operations for vets.
//!
//! # Invariants
//! - A vet must carry a non-blank name before registration.
//! - Contract input rejected by the model's clamps (the 0 sentinel) is
//!   refused here instead of being silently persisted.

use crate::model::vet::{Vet, VetId};
use crate::repo::vet_repo::VetRepository;
use crate::repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from vet registry service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Name is blank after normalization.
    InvalidName,
    /// Contract weekly hours collapsed to the rejected-input sentinel.
    InvalidWeeklyHours,
    /// Requested vet does not exist.
    VetNotFound(VetId),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "vet name must not be blank"),
            Self::InvalidWeeklyHours => {
                write!(f, "contract weekly hours must be in (0, 60]")
            }
            Self::VetNotFound(id) => write!(f, "vet not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Vet registry service facade.
pub struct VetService<R: VetRepository> {
    repo: R,
}

impl<R: VetRepository> VetService<R> {
    /// Creates service from repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers one vet aggregate; returns the generated id.
    pub fn register_vet(&self, vet: &mut Vet) -> Result<VetId, ServiceError> {
        self.validate(vet)?;
        let vet_id = self.repo.create(vet)?;
        info!(
            "event=vet_register module=service status=ok vet_id={vet_id} certifications={}",
            vet.certification_count()
        );
        Ok(vet_id)
    }

    /// Loads one aggregate by id; absence is `None`.
    pub fn get_vet(&self, id: VetId) -> Result<Option<Vet>, ServiceError> {
        self.repo.read_by_id(id).map_err(Into::into)
    }

    /// Loads one aggregate by id, failing when it does not exist.
    pub fn require_vet(&self, id: VetId) -> Result<Vet, ServiceError> {
        self.get_vet(id)?.ok_or(ServiceError::VetNotFound(id))
    }

    /// Lists every aggregate in the store.
    pub fn list_vets(&self) -> Result<Vec<Vet>, ServiceError> {
        self.repo.read_all().map_err(Into::into)
    }

    /// Updates vet scalars and reconciles the contract.
    ///
    /// Returns `Ok(false)` without touching the store for never-persisted
    /// vets. Certification changes go through `CertificationRepository`.
    pub fn update_vet(&self, vet: &Vet) -> Result<bool, ServiceError> {
        if vet.id() <= 0 {
            return Ok(false);
        }
        self.validate(vet)?;
        self.repo.update(vet).map_err(Into::into)
    }

    /// Removes one aggregate and everything it owns.
    pub fn remove_vet(&self, id: VetId) -> Result<bool, ServiceError> {
        if id <= 0 {
            return Ok(false);
        }
        let removed = self.repo.delete(id)?;
        if removed {
            info!("event=vet_remove module=service status=ok vet_id={id}");
        }
        Ok(removed)
    }

    /// Materializes the not-yet-loaded certification entries of one vet.
    pub fn load_certifications(&self, vet: &mut Vet) -> Result<(), ServiceError> {
        self.repo.load_certifications(vet).map_err(Into::into)
    }

    fn validate(&self, vet: &Vet) -> Result<(), ServiceError> {
        if vet.name().is_empty() {
            return Err(ServiceError::InvalidName);
        }
        if let Some(contract) = vet.contract() {
            // The model clamps out-of-range hours to 0; refuse the sentinel.
            if contract.weekly_hours() == 0.0 {
                return Err(ServiceError::InvalidWeeklyHours);
            }
        }
        Ok(())
    }
}
