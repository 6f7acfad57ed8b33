//! Manually curated exclusion rules.
//!
//! # Responsibility
//! - Load the "must not map" rules applied after automatic reconciliation.
//!
//! # Invariants
//! - A rules file that cannot be read or parsed is fatal.
//! - Rules are immutable once loaded.

pub mod override_rules;
