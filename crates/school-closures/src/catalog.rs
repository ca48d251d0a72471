//! Fixed option sets offered by the data-entry form.
//!
//! The store itself only requires these fields to be non-empty; the lists
//! here drive pickers and the optional strict-district validation.

use std::ops::RangeInclusive;

/// Earliest accepted year of closure.
pub const MIN_YEAR: i32 = 2020;

/// Latest accepted year of closure.
pub const MAX_YEAR: i32 = 2025;

/// Districts of Maharashtra, alphabetically.
pub const DISTRICTS: &[&str] = &[
    "Ahmednagar",
    "Akola",
    "Amravati",
    "Aurangabad",
    "Beed",
    "Bhandara",
    "Buldhana",
    "Chandrapur",
    "Dhule",
    "Gadchiroli",
    "Gondia",
    "Hingoli",
    "Jalgaon",
    "Jalna",
    "Kolhapur",
    "Latur",
    "Mumbai City",
    "Mumbai Suburban",
    "Nagpur",
    "Nanded",
    "Nandurbar",
    "Nashik",
    "Osmanabad",
    "Palghar",
    "Parbhani",
    "Pune",
    "Raigad",
    "Ratnagiri",
    "Sangli",
    "Satara",
    "Sindhudurg",
    "Solapur",
    "Thane",
    "Wardha",
    "Washim",
    "Yavatmal",
];

/// Primary reasons for closure offered by the form.
pub const CLOSURE_REASONS: &[&str] = &[
    "Low student enrollment",
    "Lack of teachers",
    "Poor infrastructure",
    "School merger policy",
    "Financial constraints",
    "Natural disaster damage",
    "Accessibility issues",
    "Government policy change",
    "Community migration",
    "Other",
];

/// Accepted years of closure.
pub fn year_range() -> RangeInclusive<i32> {
    MIN_YEAR..=MAX_YEAR
}

/// Check whether a district name is one of the known districts (exact match).
pub fn is_known_district(name: &str) -> bool {
    DISTRICTS.contains(&name)
}
