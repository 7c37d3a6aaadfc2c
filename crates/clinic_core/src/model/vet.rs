//! Vet aggregate root.
//!
//! # Responsibility
//! - Hold the vet's scalar attributes, the optional contract and the keyed
//!   certification collection.
//! - Manage placeholder keys for certifications awaiting persistence and
//!   the loaded/not-loaded state of lazily materialized entries.
//!
//! # Invariants
//! - Map keys > 0 are server-assigned certification ids; keys <= 0 are
//!   caller-local placeholders.
//! - Equality is identity equality: two vets are equal only when both carry
//!   the same non-zero id.

use crate::model::certification::{Certification, CertificationId};
use crate::model::contract::Contract;
use crate::model::{normalize_date, normalize_id, normalize_string};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identifier of a persisted vet. 0 means "not yet persisted".
pub type VetId = i64;

/// One entry of the certification collection.
///
/// `NotLoaded` marks a certification known to exist by id whose row has not
/// been fetched yet; it is distinct from the entry being absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationSlot {
    /// Row data fetched and materialized.
    Loaded(Certification),
    /// Known id, row not fetched yet.
    NotLoaded,
}

/// Aggregate root: a vet, an optional contract and owned certifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vet {
    id: VetId,
    name: String,
    surname: String,
    hired_on: String,
    contract: Option<Contract>,
    certifications: BTreeMap<i64, CertificationSlot>,
}

impl Vet {
    /// Creates an unpersisted vet (`id` 0, no contract, no certifications).
    pub fn new(name: impl AsRef<str>, surname: impl AsRef<str>, hired_on: impl AsRef<str>) -> Self {
        let mut vet = Self {
            id: 0,
            name: String::new(),
            surname: String::new(),
            hired_on: String::new(),
            contract: None,
            certifications: BTreeMap::new(),
        };
        vet.set_name(name.as_ref());
        vet.set_surname(surname.as_ref());
        vet.set_hired_on(hired_on.as_ref());
        vet
    }

    pub fn id(&self) -> VetId {
        self.id
    }

    pub fn set_id(&mut self, id: VetId) {
        self.id = normalize_id(id);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = normalize_string(name);
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn set_surname(&mut self, surname: &str) {
        self.surname = normalize_string(surname);
    }

    pub fn hired_on(&self) -> &str {
        &self.hired_on
    }

    /// Invalid dates collapse to the empty sentinel.
    pub fn set_hired_on(&mut self, hired_on: &str) {
        self.hired_on = normalize_date(hired_on);
    }

    pub fn contract(&self) -> Option<&Contract> {
        self.contract.as_ref()
    }

    pub fn contract_mut(&mut self) -> Option<&mut Contract> {
        self.contract.as_mut()
    }

    /// Replaces the optional contract. Passing `None` marks the existing
    /// contract as an orphan; the aggregate repository removes its row on
    /// the next update.
    pub fn set_contract(&mut self, contract: Option<Contract>) {
        self.contract = contract;
    }

    /// Files a new certification under the next free placeholder key and
    /// returns that key.
    pub fn add_certification(&mut self, certification: Certification) -> i64 {
        let key = self.next_placeholder_key();
        self.certifications
            .insert(key, CertificationSlot::Loaded(certification));
        key
    }

    /// Records a certification known to exist by id, without its row data.
    pub fn attach_certification(&mut self, id: CertificationId) {
        if id > 0 {
            self.certifications
                .entry(id)
                .or_insert(CertificationSlot::NotLoaded);
        }
    }

    /// Removes one collection entry by key; returns whether it existed.
    pub fn remove_certification(&mut self, key: i64) -> bool {
        self.certifications.remove(&key).is_some()
    }

    pub fn clear_certifications(&mut self) {
        self.certifications.clear();
    }

    pub fn certification_count(&self) -> usize {
        self.certifications.len()
    }

    /// Collection keys in ascending order (placeholders first).
    pub fn certification_keys(&self) -> Vec<i64> {
        self.certifications.keys().copied().collect()
    }

    pub fn certification(&self, key: i64) -> Option<&CertificationSlot> {
        self.certifications.get(&key)
    }

    /// Materialized certifications, skipping `NotLoaded` entries.
    pub fn loaded_certifications(&self) -> impl Iterator<Item = &Certification> {
        self.certifications.values().filter_map(|slot| match slot {
            CertificationSlot::Loaded(certification) => Some(certification),
            CertificationSlot::NotLoaded => None,
        })
    }

    /// Whether any entry still sits under a placeholder key.
    pub fn has_placeholder_keys(&self) -> bool {
        self.certifications.keys().any(|key| *key <= 0)
    }

    /// Keys of entries whose row data has not been fetched yet.
    pub fn unresolved_certification_ids(&self) -> Vec<CertificationId> {
        self.certifications
            .iter()
            .filter(|(key, slot)| **key > 0 && matches!(slot, CertificationSlot::NotLoaded))
            .map(|(key, _)| *key)
            .collect()
    }

    /// Marks one known id as materialized with its row data.
    pub fn resolve_certification(&mut self, id: CertificationId, certification: Certification) {
        if id > 0 {
            self.certifications
                .insert(id, CertificationSlot::Loaded(certification));
        }
    }

    /// Drains the entries the create cascade must insert: placeholder key
    /// and still-unpersisted data. Any other combination is treated as
    /// already persisted and stays in place.
    pub fn take_unpersisted_certifications(&mut self) -> Vec<(i64, Certification)> {
        let pending_keys: Vec<i64> = self
            .certifications
            .iter()
            .filter(|(key, slot)| {
                **key <= 0
                    && matches!(slot, CertificationSlot::Loaded(certification) if !certification.is_persisted())
            })
            .map(|(key, _)| *key)
            .collect();

        let mut pending = Vec::with_capacity(pending_keys.len());
        for key in pending_keys {
            if let Some(CertificationSlot::Loaded(certification)) = self.certifications.remove(&key)
            {
                pending.push((key, certification));
            }
        }
        pending
    }

    /// Re-files an inserted certification under its server-generated id.
    pub fn put_certification(&mut self, certification: Certification) {
        let id = certification.id();
        if id > 0 {
            self.certifications
                .insert(id, CertificationSlot::Loaded(certification));
        }
    }

    fn next_placeholder_key(&self) -> i64 {
        match self.certifications.keys().next() {
            Some(smallest) if *smallest <= 0 => smallest - 1,
            _ => 0,
        }
    }
}

impl PartialEq for Vet {
    /// Identity equality: never-persisted vets compare unequal, even to
    /// themselves.
    fn eq(&self, other: &Self) -> bool {
        self.id != 0 && self.id == other.id
    }
}
