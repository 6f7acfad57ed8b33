//! JEP to project reconciliation.
//!
//! # Responsibility
//! - Union the discussion, release and declared-project signals of every JEP
//!   into project memberships.
//! - Apply override rules last, removing forbidden pairs wherever they came
//!   from (signals or ingestion).
//!
//! # Invariants
//! - No (JEP, project) pair forbidden by an override rule survives.
//! - Override rules only remove memberships.
//! - A second run over unchanged inputs adds nothing.
//! - Unknown project ids and unusable release labels are skipped, not errors.

use crate::model::group::{GroupId, ReleaseLineConfig};
use crate::model::item::{Item, ItemNumber, MemberRef};
use crate::repo::entity_store::EntityStore;
use crate::rules::override_rules::OverrideRules;
use crate::service::signals::{
    declared_group_candidates, discussion_group_candidate, release_group_candidate,
};
use log::{debug, info};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Heuristic that suggested a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal {
    Discussion,
    Release,
    Declared,
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Discussion => "discussion",
            Self::Release => "release",
            Self::Declared => "declared",
        };
        f.write_str(label)
    }
}

/// Outcome counters of one reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Memberships newly inserted.
    pub added: usize,
    /// Candidates blocked by an override rule.
    pub suppressed: usize,
    /// Candidates naming a project that is not in the store.
    pub unresolved: usize,
    /// Existing memberships removed by an override rule.
    pub removed: usize,
    /// Declared project ids removed from JEPs by an override rule.
    pub declared_removed: usize,
}

/// Applies membership signals and override rules to a store.
pub struct GroupReconciler<'a> {
    rules: &'a OverrideRules,
    release_lines: &'a ReleaseLineConfig,
}

impl<'a> GroupReconciler<'a> {
    pub fn new(rules: &'a OverrideRules, release_lines: &'a ReleaseLineConfig) -> Self {
        Self {
            rules,
            release_lines,
        }
    }

    /// Project candidates of one JEP, keyed by id with the first signal that
    /// produced each.
    pub fn candidates(&self, item: &Item) -> BTreeMap<GroupId, Signal> {
        let mut candidates = BTreeMap::new();

        if let Some(id) = item
            .discussion
            .as_deref()
            .and_then(discussion_group_candidate)
        {
            candidates.entry(id).or_insert(Signal::Discussion);
        }

        if let Some(release) = item.release.as_deref() {
            match release_group_candidate(release, self.release_lines) {
                Some(id) => {
                    candidates.entry(id).or_insert(Signal::Release);
                }
                None => debug!(
                    "event=release_signal_skipped module=reconciler status=skip number={} release={release}",
                    item.number()
                ),
            }
        }

        for id in declared_group_candidates(item) {
            candidates.entry(id.to_string()).or_insert(Signal::Declared);
        }

        candidates
    }

    /// Populates memberships for every JEP, then strips forbidden pairs.
    pub fn reconcile(&self, store: &mut EntityStore) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let mut planned: Vec<(GroupId, MemberRef)> = Vec::new();

        for item in store.items() {
            for (group_id, signal) in self.candidates(item) {
                if !store.contains_group(&group_id) {
                    debug!(
                        "event=group_unresolved module=reconciler status=skip number={} group={group_id} signal={signal}",
                        item.number()
                    );
                    report.unresolved += 1;
                    continue;
                }
                if self.rules.forbids(item.number(), &group_id) {
                    debug!(
                        "event=membership_suppressed module=reconciler status=skip number={} group={group_id} signal={signal}",
                        item.number()
                    );
                    report.suppressed += 1;
                    continue;
                }
                planned.push((group_id, item.member_ref()));
            }
        }

        for (group_id, member) in planned {
            if let Ok(group) = store.get_group_mut(&group_id) {
                let number = member.number;
                if group.insert_member(member) {
                    debug!(
                        "event=membership_added module=reconciler status=ok number={number} group={group_id}"
                    );
                    report.added += 1;
                }
            }
        }

        report.removed = self.remove_forbidden_memberships(store);
        report.declared_removed = self.remove_forbidden_declarations(store);

        info!(
            "event=groups_reconciled module=reconciler status=ok added={} suppressed={} unresolved={} removed={} declared_removed={}",
            report.added,
            report.suppressed,
            report.unresolved,
            report.removed,
            report.declared_removed
        );
        report
    }

    fn remove_forbidden_memberships(&self, store: &mut EntityStore) -> usize {
        let mut removed = 0;

        for group in store.groups_mut() {
            let forbidden: Vec<ItemNumber> = group
                .members()
                .iter()
                .filter(|member| self.rules.forbids(member.number, group.id()))
                .map(|member| member.number)
                .collect();

            for number in forbidden {
                if group.remove_member(number) {
                    info!(
                        "event=membership_removed module=reconciler status=ok number={number} group={}",
                        group.id()
                    );
                    removed += 1;
                }
            }
        }

        removed
    }

    fn remove_forbidden_declarations(&self, store: &mut EntityStore) -> usize {
        let mut removed = 0;

        for item in store.items_mut() {
            let number = item.number();
            let before = item.declared_groups.len();
            item.declared_groups
                .retain(|group_id| !self.rules.forbids(number, group_id));
            removed += before - item.declared_groups.len();
        }

        removed
    }
}
