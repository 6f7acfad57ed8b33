//! Domain model for JEPs, OpenJDK projects and raw issue links.
//!
//! # Responsibility
//! - Define the canonical entities handed between ingestion, resolution,
//!   reconciliation and rendering.
//! - Keep identity rules (`(number, name)` for items, lowercase id for groups)
//!   in one place.
//!
//! # Invariants
//! - An item never lists its own number as related or depends-on.
//! - Group membership is a set keyed by JEP number; re-adding an item has no
//!   effect beyond refreshing its name.

pub mod group;
pub mod item;
pub mod link;
