//! Core use-case services.
//!
//! # Responsibility
//! - Resolve tracker links into JEP numbers.
//! - Reconcile JEPs with projects from independent signals plus overrides.
//! - Orchestrate both phases for callers.

pub mod catalog_service;
pub mod group_reconciler;
pub mod relationship_resolver;
pub mod signals;
