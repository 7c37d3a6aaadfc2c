//! Domain model for the clinic staff aggregate.
//!
//! # Responsibility
//! - Define the Vet aggregate root, its optional Contract and its owned
//!   Certifications.
//! - Provide the normalization rules shared by constructors, setters and
//!   row mapping.
//!
//! # Invariants
//! - A contract's key always equals the owning vet's id.
//! - A certification's `vet_id` always equals the vet it is reachable from.
//! - Identifier 0 means "not yet persisted"; non-positive map keys are
//!   placeholders awaiting a server-generated id.

pub mod certification;
pub mod contract;
pub mod vet;

use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("static date pattern"));

/// Trims a string value; blank input collapses to the empty string.
pub(crate) fn normalize_string(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Clamps an identifier to the "not yet persisted" sentinel when negative.
pub(crate) fn normalize_id(id: i64) -> i64 {
    id.max(0)
}

/// Validates an ISO `YYYY-MM-DD` date; invalid input collapses to `""`.
///
/// Callers detect rejected input by checking for the empty sentinel, the
/// same contract the numeric clamps use.
pub(crate) fn normalize_date(value: &str) -> String {
    let trimmed = value.trim();
    let Some(captures) = ISO_DATE_RE.captures(trimmed) else {
        return String::new();
    };

    let year: i32 = captures[1].parse().unwrap_or(0);
    let month: u32 = captures[2].parse().unwrap_or(0);
    let day: u32 = captures[3].parse().unwrap_or(0);

    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return String::new();
    }

    trimmed.to_string()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::{normalize_date, normalize_id, normalize_string};

    #[test]
    fn strings_trim_and_collapse_blank_input() {
        assert_eq!(normalize_string("  Ada  "), "Ada");
        assert_eq!(normalize_string("   "), "");
        assert_eq!(normalize_string(""), "");
    }

    #[test]
    fn ids_clamp_negative_values_to_zero() {
        assert_eq!(normalize_id(-7), 0);
        assert_eq!(normalize_id(0), 0);
        assert_eq!(normalize_id(42), 42);
    }

    #[test]
    fn dates_require_valid_iso_calendar_values() {
        assert_eq!(normalize_date("2024-02-29"), "2024-02-29");
        assert_eq!(normalize_date(" 2023-07-01 "), "2023-07-01");
        assert_eq!(normalize_date("2023-02-29"), "");
        assert_eq!(normalize_date("2023-13-01"), "");
        assert_eq!(normalize_date("2023-04-31"), "");
        assert_eq!(normalize_date("01/02/2023"), "");
        assert_eq!(normalize_date(""), "");
    }
}
