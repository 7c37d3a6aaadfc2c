//! Contract model: the optional 1:1 record sharing the vet's identifier.
//!
//! # Invariants
//! - `vet_id` is never assigned independently; the aggregate repository
//!   forces it to the owning vet's id before persistence.
//! - Out-of-range numeric input clamps to the 0 sentinel instead of
//!   raising an error.

use crate::model::vet::VetId;
use crate::model::{normalize_id, normalize_string};
use serde::{Deserialize, Serialize};

/// Upper bound for a legal weekly schedule, in hours.
pub const MAX_WEEKLY_HOURS: f64 = 60.0;

/// Employment terms attached to exactly one vet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    vet_id: VetId,
    position: String,
    base_salary: f64,
    weekly_hours: f64,
}

impl Contract {
    /// Creates a contract not yet attached to a persisted vet.
    pub fn new(position: impl AsRef<str>, base_salary: f64, weekly_hours: f64) -> Self {
        let mut contract = Self {
            vet_id: 0,
            position: String::new(),
            base_salary: 0.0,
            weekly_hours: 0.0,
        };
        contract.set_position(position.as_ref());
        contract.set_base_salary(base_salary);
        contract.set_weekly_hours(weekly_hours);
        contract
    }

    pub fn vet_id(&self) -> VetId {
        self.vet_id
    }

    pub fn set_vet_id(&mut self, vet_id: VetId) {
        self.vet_id = normalize_id(vet_id);
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn set_position(&mut self, position: &str) {
        self.position = normalize_string(position);
    }

    pub fn base_salary(&self) -> f64 {
        self.base_salary
    }

    /// Negative salaries clamp to 0.
    pub fn set_base_salary(&mut self, base_salary: f64) {
        self.base_salary = if base_salary >= 0.0 { base_salary } else { 0.0 };
    }

    pub fn weekly_hours(&self) -> f64 {
        self.weekly_hours
    }

    /// Hours outside `(0, 60]` clamp to the 0 sentinel.
    pub fn set_weekly_hours(&mut self, weekly_hours: f64) {
        self.weekly_hours = if weekly_hours > 0.0 && weekly_hours <= MAX_WEEKLY_HOURS {
            weekly_hours
        } else {
            0.0
        };
    }
}
