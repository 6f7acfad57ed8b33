//! Two-phase translation of tracker links into JEP numbers.
//!
//! # Responsibility
//! - Phase 1: index every JEP's tracker key once all JEPs are in the store.
//! - Phase 2: rewrite each JEP's pending links through that index.
//!
//! # Invariants
//! - Phase 2 only runs with an index built from the complete store, so
//!   forward references are never translated early.
//! - After phase 2, `related`/`depends` hold only numbers present in the
//!   store and never the JEP's own number.
//! - Pending links are drained, so a second run changes nothing.
//! - `depends` stays one-directional; `related` is mirrored onto the
//!   other JEP.

use crate::model::item::{ForeignId, ItemNumber};
use crate::repo::entity_store::EntityStore;
use log::{debug, info, warn};
use std::collections::HashMap;

/// Two JEPs claiming the same tracker key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignIdCollision {
    pub foreign_id: ForeignId,
    /// Mapping that was replaced.
    pub previous: ItemNumber,
    /// Mapping that won (seen later in number order).
    pub replacement: ItemNumber,
}

/// Outcome counters of one resolution run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Links rewritten into a JEP number.
    pub translated: usize,
    /// Links whose tracker key has no JEP.
    pub dangling: usize,
    /// Links that resolved to the owning JEP.
    pub self_references: usize,
    /// Related links added to the other side.
    pub mirrored: usize,
    pub collisions: Vec<ForeignIdCollision>,
}

/// Tracker key to JEP number index (phase 1).
#[derive(Debug, Clone, Default)]
pub struct ForeignIdIndex {
    numbers: HashMap<ForeignId, ItemNumber>,
    collisions: Vec<ForeignIdCollision>,
}

impl ForeignIdIndex {
    /// Indexes every JEP in `store`, ascending by number; later JEPs win
    /// collisions.
    pub fn build(store: &EntityStore) -> Self {
        let mut index = Self::default();

        for item in store.items() {
            let Some(foreign_id) = item.external_ref.as_deref().map(str::trim) else {
                continue;
            };
            if foreign_id.is_empty() {
                continue;
            }

            if let Some(previous) = index.numbers.insert(foreign_id.to_string(), item.number()) {
                warn!(
                    "event=foreign_id_collision module=resolver status=warn foreign_id={} previous={} replacement={}",
                    foreign_id,
                    previous,
                    item.number()
                );
                index.collisions.push(ForeignIdCollision {
                    foreign_id: foreign_id.to_string(),
                    previous,
                    replacement: item.number(),
                });
            }
        }

        index
    }

    pub fn lookup(&self, foreign_id: &str) -> Option<ItemNumber> {
        self.numbers.get(foreign_id.trim()).copied()
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn collisions(&self) -> &[ForeignIdCollision] {
        &self.collisions
    }

    /// Rewrites every pending link in `store` (phase 2).
    pub fn apply(&self, store: &mut EntityStore) -> ResolveReport {
        let mut report = ResolveReport {
            collisions: self.collisions.clone(),
            ..ResolveReport::default()
        };
        let known = store.item_numbers();
        let mut mirror_edges = Vec::new();

        for item in store.items_mut() {
            let owner = item.number();
            let stale = item.retain_edges(|number| known.binary_search(&number).is_ok());
            if stale > 0 {
                debug!(
                    "event=stale_edges_dropped module=resolver status=skip number={owner} count={stale}"
                );
                report.dangling += stale;
            }

            let (pending_related, pending_depends) = item.take_pending_links();

            for (foreign_id, is_depends) in pending_related
                .into_iter()
                .map(|id| (id, false))
                .chain(pending_depends.into_iter().map(|id| (id, true)))
            {
                let Some(number) = self.translate(&foreign_id, &known) else {
                    debug!(
                        "event=dangling_link module=resolver status=skip number={owner} foreign_id={foreign_id}"
                    );
                    report.dangling += 1;
                    continue;
                };
                if number == owner {
                    debug!(
                        "event=self_link module=resolver status=skip number={owner} foreign_id={foreign_id}"
                    );
                    report.self_references += 1;
                    continue;
                }

                report.translated += 1;
                if is_depends {
                    item.add_depends(number);
                } else {
                    item.add_related(number);
                    mirror_edges.push((number, owner));
                }
            }
        }

        for (target, source) in mirror_edges {
            if let Ok(other) = store.get_item_mut(target) {
                if other.add_related(source) {
                    report.mirrored += 1;
                }
            }
        }

        info!(
            "event=links_resolved module=resolver status=ok translated={} dangling={} self_references={} mirrored={} collisions={}",
            report.translated,
            report.dangling,
            report.self_references,
            report.mirrored,
            report.collisions.len()
        );
        report
    }

    fn translate(&self, foreign_id: &str, known: &[ItemNumber]) -> Option<ItemNumber> {
        self.lookup(foreign_id)
            .filter(|number| known.binary_search(number).is_ok())
    }
}

/// Runs both resolution phases over a fully ingested store.
pub fn resolve_relationships(store: &mut EntityStore) -> ResolveReport {
    let index = ForeignIdIndex::build(store);
    index.apply(store)
}
