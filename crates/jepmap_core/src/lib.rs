//! Core domain logic for JEPMap.
//! This crate is the single source of truth for reconciliation invariants:
//! JEP relationship resolution, JEP-to-project membership and corpus search.

pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod repo;
pub mod rules;
pub mod search;
pub mod service;

pub use config::{ConfigError, EngineConfig, SearchConfig};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status};
pub use model::group::{release_line_groups, Group, GroupId, GroupKind, ReleaseLineConfig};
pub use model::item::{ForeignId, Item, ItemNumber, ItemRecord, MemberRef};
pub use model::link::{LinkDirection, LinkKind, RawLink};
pub use repo::entity_store::{EntityStore, RepoError, RepoResult};
pub use repo::record_store::{load_records, save_records, RecordError, RecordResult};
pub use rules::override_rules::{OverrideRules, OverrideRulesError, WILDCARD};
pub use search::corpus::{extract_snippets, CorpusIndex, SearchHit, SearchQuery};
pub use service::catalog_service::{CatalogService, FinalizeReport};
pub use service::group_reconciler::{GroupReconciler, ReconcileReport, Signal};
pub use service::relationship_resolver::{
    resolve_relationships, ForeignIdCollision, ForeignIdIndex, ResolveReport,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
