//! Catalog finalization use-case.
//!
//! # Responsibility
//! - Run relationship resolution and project reconciliation in the only
//!   supported order over a fully ingested store.
//! - Register the synthesized release-line projects.
//!
//! # Invariants
//! - Resolution always finishes before reconciliation starts.
//! - The store is ready for rendering and record export once `finalize`
//!   returns.

use crate::config::EngineConfig;
use crate::model::group::release_line_groups;
use crate::repo::entity_store::EntityStore;
use crate::rules::override_rules::OverrideRules;
use crate::service::group_reconciler::{GroupReconciler, ReconcileReport};
use crate::service::relationship_resolver::{resolve_relationships, ResolveReport};

/// Combined outcome of one finalization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalizeReport {
    pub links: ResolveReport,
    pub groups: ReconcileReport,
}

/// Use-case service owning the run's override rules and configuration.
pub struct CatalogService {
    rules: OverrideRules,
    config: EngineConfig,
}

impl CatalogService {
    pub fn new(rules: OverrideRules, config: EngineConfig) -> Self {
        Self { rules, config }
    }

    pub fn rules(&self) -> &OverrideRules {
        &self.rules
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Adds one release-line project per configured JDK major version.
    ///
    /// Returns the number of projects added; existing ids are left untouched.
    pub fn register_release_lines(&self, store: &mut EntityStore) -> usize {
        let mut added = 0;
        for group in release_line_groups(&self.config.release_lines) {
            if store.contains_group(group.id()) {
                continue;
            }
            store.put_group(group);
            added += 1;
        }
        added
    }

    /// Resolves links, then reconciles project memberships.
    pub fn finalize(&self, store: &mut EntityStore) -> FinalizeReport {
        let links = resolve_relationships(store);
        let groups = GroupReconciler::new(&self.rules, &self.config.release_lines).reconcile(store);
        FinalizeReport { links, groups }
    }
}
