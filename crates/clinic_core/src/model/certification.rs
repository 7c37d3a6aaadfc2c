//! Certification model: a 1:N child owned by exactly one vet.
//!
//! # Invariants
//! - `id` 0 means "not yet persisted"; the repository fills in the
//!   server-generated value on insert.
//! - `vet_id` is the mandatory foreign key back to the owning vet.

use crate::model::vet::VetId;
use crate::model::{normalize_id, normalize_string};
use serde::{Deserialize, Serialize};

/// Stable identifier of a persisted certification.
pub type CertificationId = i64;

/// One speciality credential held by a vet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    id: CertificationId,
    vet_id: VetId,
    specialty: String,
    issued_by: String,
}

impl Certification {
    /// Creates an unpersisted certification (`id` 0, no owner yet).
    pub fn new(specialty: impl AsRef<str>, issued_by: impl AsRef<str>) -> Self {
        let mut certification = Self {
            id: 0,
            vet_id: 0,
            specialty: String::new(),
            issued_by: String::new(),
        };
        certification.set_specialty(specialty.as_ref());
        certification.set_issued_by(issued_by.as_ref());
        certification
    }

    pub fn id(&self) -> CertificationId {
        self.id
    }

    pub fn set_id(&mut self, id: CertificationId) {
        self.id = normalize_id(id);
    }

    pub fn vet_id(&self) -> VetId {
        self.vet_id
    }

    pub fn set_vet_id(&mut self, vet_id: VetId) {
        self.vet_id = normalize_id(vet_id);
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    pub fn set_specialty(&mut self, specialty: &str) {
        self.specialty = normalize_string(specialty);
    }

    pub fn issued_by(&self) -> &str {
        &self.issued_by
    }

    pub fn set_issued_by(&mut self, issued_by: &str) {
        self.issued_by = normalize_string(issued_by);
    }

    /// Whether this certification still awaits its server-generated id.
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}

#[cfg(test)]
mod tests {
    use super::Certification;

    #[test]
    fn new_certification_is_unpersisted() {
        let certification = Certification::new("  cardiology ", " AVMA ");
        assert_eq!(certification.id(), 0);
        assert_eq!(certification.vet_id(), 0);
        assert!(!certification.is_persisted());
        assert_eq!(certification.specialty(), "cardiology");
        assert_eq!(certification.issued_by(), "AVMA");
    }

    #[test]
    fn negative_identifiers_clamp_to_zero() {
        let mut certification = Certification::new("surgery", "RCVS");
        certification.set_id(-1);
        certification.set_vet_id(-9);
        assert_eq!(certification.id(), 0);
        assert_eq!(certification.vet_id(), 0);
    }
}
