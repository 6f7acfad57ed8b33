//! In-memory entity registry and durable record files.
//!
//! # Responsibility
//! - Hold the canonical JEP and project collections for one run.
//! - Save and reload JEP records as one JSON file per JEP.
//!
//! # Invariants
//! - JEP numbers and group ids are unique; re-inserting a key replaces the
//!   previous entry (last write wins).
//! - JEP iteration is ascending by number; group iteration follows insertion.

pub mod entity_store;
pub mod record_store;
