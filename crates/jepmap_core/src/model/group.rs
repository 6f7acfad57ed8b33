//! OpenJDK project and release-line groups.
//!
//! # Responsibility
//! - Build groups from the two sources: the organizational sidebar listing
//!   and the synthesized JDK release trains.
//! - Own the set-based JEP membership of each group.
//!
//! # Invariants
//! - `id` is lowercase and trimmed.
//! - A release-line id is built by [`ReleaseLineConfig::group_id`] only, so the
//!   reconciler and the group factory always agree.

use crate::ingest::links::group_id_from_link;
use crate::model::item::{Item, ItemNumber, MemberRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Lowercase project id, e.g. `valhalla` or `jdk/17`.
pub type GroupId = String;

/// Where a group came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Listed in the site sidebar, id taken from its `/projects/<id>` link.
    Organizational,
    /// Synthesized for one JDK release train.
    ReleaseLine { major: u32 },
}

/// Naming rules for the synthesized release-line groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseLineConfig {
    /// Id prefix, e.g. `jdk`.
    pub prefix: String,
    /// From this major version on, ids gain a path separator (`jdk/10`).
    pub separator_threshold: u32,
    pub first_major: u32,
    pub last_major: u32,
}

impl Default for ReleaseLineConfig {
    fn default() -> Self {
        Self {
            prefix: "jdk".to_string(),
            separator_threshold: 10,
            first_major: 6,
            last_major: 18,
        }
    }
}

impl ReleaseLineConfig {
    /// Returns the group id of the release line for `major`.
    pub fn group_id(&self, major: u32) -> GroupId {
        let separator = if major >= self.separator_threshold {
            "/"
        } else {
            ""
        };
        format!("{}{separator}{major}", self.prefix.trim().to_lowercase())
    }

    /// Returns the display name of the release line for `major`.
    pub fn group_name(&self, major: u32) -> String {
        format!("{}{major}", self.prefix.trim().to_uppercase())
    }
}

/// One OpenJDK project or release train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub wiki_url: Option<String>,
    kind: GroupKind,
    members: BTreeSet<MemberRef>,
}

impl Group {
    /// Creates an organizational group with a normalized id.
    pub fn organizational(id: &str, name: impl Into<String>) -> Self {
        Self::with_kind(normalize_group_id(id), name.into(), GroupKind::Organizational)
    }

    /// Creates an organizational group from a sidebar link.
    ///
    /// Returns `None` when `link` is not a project link on `host`.
    pub fn organizational_from_link(link: &str, name: impl Into<String>, host: &str) -> Option<Self> {
        let id = group_id_from_link(link, host)?;
        Some(Self::with_kind(id, name.into(), GroupKind::Organizational))
    }

    /// Creates the release-line group for `major`.
    pub fn release_line(major: u32, config: &ReleaseLineConfig) -> Self {
        Self::with_kind(
            config.group_id(major),
            config.group_name(major),
            GroupKind::ReleaseLine { major },
        )
    }

    fn with_kind(id: GroupId, name: String, kind: GroupKind) -> Self {
        Self {
            id,
            name,
            description: None,
            url: None,
            wiki_url: None,
            kind,
            members: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Adds `item` as a member. Returns `true` only for a new membership.
    ///
    /// A member with the same number but an outdated name is replaced.
    pub fn add_member(&mut self, item: &Item) -> bool {
        self.insert_member(item.member_ref())
    }

    pub(crate) fn insert_member(&mut self, member: MemberRef) -> bool {
        if self.members.contains(&member) {
            return false;
        }
        let renamed = self.remove_member(member.number);
        self.members.insert(member);
        !renamed
    }

    /// Removes every membership of JEP `number`.
    pub fn remove_member(&mut self, number: ItemNumber) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member.number != number);
        before != self.members.len()
    }

    pub fn has_member(&self, number: ItemNumber) -> bool {
        self.members.iter().any(|member| member.number == number)
    }

    /// Members ordered by JEP number.
    pub fn members(&self) -> &BTreeSet<MemberRef> {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Builds one release-line group per configured major version.
pub fn release_line_groups(config: &ReleaseLineConfig) -> Vec<Group> {
    (config.first_major..=config.last_major)
        .map(|major| Group::release_line(major, config))
        .collect()
}

pub(crate) fn normalize_group_id(id: &str) -> GroupId {
    id.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{release_line_groups, Group, GroupKind, ReleaseLineConfig};
    use crate::model::item::Item;

    #[test]
    fn release_line_ids_gain_separator_at_threshold() {
        let config = ReleaseLineConfig::default();
        assert_eq!(config.group_id(9), "jdk9");
        assert_eq!(config.group_id(10), "jdk/10");
        assert_eq!(config.group_id(17), "jdk/17");
        assert_eq!(config.group_name(17), "JDK17");
    }

    #[test]
    fn release_line_groups_cover_configured_range() {
        let groups = release_line_groups(&ReleaseLineConfig::default());
        assert_eq!(groups.len(), 13);
        assert_eq!(groups[0].id(), "jdk6");
        assert_eq!(groups[12].id(), "jdk/18");
        assert_eq!(groups[12].kind(), GroupKind::ReleaseLine { major: 18 });
    }

    #[test]
    fn organizational_ids_are_lowercased() {
        let group = Group::organizational(" Valhalla ", "Valhalla");
        assert_eq!(group.id(), "valhalla");
        assert_eq!(group.kind(), GroupKind::Organizational);
    }

    #[test]
    fn membership_is_idempotent() {
        let mut group = Group::organizational("amber", "Amber");
        let item = Item::new(286, "Local-Variable Type Inference");
        assert!(group.add_member(&item));
        assert!(!group.add_member(&item));
        assert_eq!(group.member_count(), 1);

        let renamed = Item::new(286, "Local Variable Type Inference");
        assert!(!group.add_member(&renamed));
        assert_eq!(group.member_count(), 1);
        assert_eq!(
            group.members().iter().next().map(|member| member.name.as_str()),
            Some("Local Variable Type Inference")
        );

        assert!(group.remove_member(286));
        assert!(!group.has_member(286));
    }
}
