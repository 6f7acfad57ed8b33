//! JEP domain model.
//!
//! # Responsibility
//! - Hold the scalar fields extracted by ingestion.
//! - Queue raw links in the foreign id space until resolution.
//! - Provide the durable record shape used for save/reload.
//!
//! # Invariants
//! - Identity is `(number, name)`; other fields do not take part in equality.
//! - `related` and `depends` never contain `number`.
//! - Pending (foreign id) links are never serialized.

use crate::model::link::{LinkKind, RawLink};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// Externally assigned JEP number.
pub type ItemNumber = u32;

/// Issue tracker key without its `JDK-` prefix.
pub type ForeignId = String;

const ITEM_TITLE_LABEL: &str = "JEP";
const UNNUMBERED_TITLE_PREFIX: &str = "JEP XXX:";

/// One JEP.
#[derive(Debug, Clone)]
pub struct Item {
    number: ItemNumber,
    name: String,
    pub status: String,
    pub created: String,
    pub updated: String,
    /// Target release label, may be `tbd`.
    pub release: Option<String>,
    /// Discussion list with word-encoded punctuation.
    pub discussion: Option<String>,
    /// Tracker key used by other issues to link to this one.
    pub external_ref: Option<ForeignId>,
    pub body: Option<String>,
    /// Project ids linked from the body.
    pub declared_groups: BTreeSet<String>,
    related: BTreeSet<ItemNumber>,
    depends: BTreeSet<ItemNumber>,
    pending_related: BTreeSet<ForeignId>,
    pending_depends: BTreeSet<ForeignId>,
}

impl Item {
    /// Creates an item, stripping the redundant `JEP <number>:` title prefix.
    pub fn new(number: ItemNumber, title: &str) -> Self {
        Self {
            number,
            name: display_name(number, title),
            status: String::new(),
            created: String::new(),
            updated: String::new(),
            release: None,
            discussion: None,
            external_ref: None,
            body: None,
            declared_groups: BTreeSet::new(),
            related: BTreeSet::new(),
            depends: BTreeSet::new(),
            pending_related: BTreeSet::new(),
            pending_depends: BTreeSet::new(),
        }
    }

    pub fn number(&self) -> ItemNumber {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn related(&self) -> &BTreeSet<ItemNumber> {
        &self.related
    }

    pub fn depends(&self) -> &BTreeSet<ItemNumber> {
        &self.depends
    }

    /// Adds a related JEP. Returns `false` for self references and repeats.
    pub fn add_related(&mut self, number: ItemNumber) -> bool {
        number != self.number && self.related.insert(number)
    }

    /// Adds a depends-on JEP. Returns `false` for self references and repeats.
    pub fn add_depends(&mut self, number: ItemNumber) -> bool {
        number != self.number && self.depends.insert(number)
    }

    /// Queues a raw tracker link for later translation.
    ///
    /// Links to issues that are not of `item_issue_type`, and links back to
    /// this item's own tracker key, are ignored and return `false`.
    pub fn record_link(&mut self, link: &RawLink, item_issue_type: &str) -> bool {
        if !link.targets_item(item_issue_type) || link.foreign_id.is_empty() {
            return false;
        }
        if self.external_ref.as_deref() == Some(link.foreign_id.as_str()) {
            return false;
        }

        match link.kind() {
            LinkKind::Depends => self.pending_depends.insert(link.foreign_id.clone()),
            LinkKind::Related => self.pending_related.insert(link.foreign_id.clone()),
        }
    }

    /// Foreign ids still waiting for translation, as `(related, depends)`.
    pub fn pending_links(&self) -> (&BTreeSet<ForeignId>, &BTreeSet<ForeignId>) {
        (&self.pending_related, &self.pending_depends)
    }

    pub fn has_pending_links(&self) -> bool {
        !self.pending_related.is_empty() || !self.pending_depends.is_empty()
    }

    pub(crate) fn take_pending_links(&mut self) -> (BTreeSet<ForeignId>, BTreeSet<ForeignId>) {
        (
            std::mem::take(&mut self.pending_related),
            std::mem::take(&mut self.pending_depends),
        )
    }

    /// Drops resolved edges for which `keep` is false. Returns the number dropped.
    pub(crate) fn retain_edges(&mut self, keep: impl Fn(ItemNumber) -> bool) -> usize {
        let before = self.related.len() + self.depends.len();
        self.related.retain(|&number| keep(number));
        self.depends.retain(|&number| keep(number));
        before - self.related.len() - self.depends.len()
    }

    /// Key used for group membership sets.
    pub fn member_ref(&self) -> MemberRef {
        MemberRef {
            number: self.number,
            name: self.name.clone(),
        }
    }

    pub fn to_record(&self) -> ItemRecord {
        ItemRecord {
            name: self.name.clone(),
            number: self.number,
            status: self.status.clone(),
            created: self.created.clone(),
            updated: self.updated.clone(),
            release: self.release.clone(),
            discussion: self.discussion.clone(),
            issue: self.external_ref.clone(),
            body: self.body.clone(),
            related: self.related.clone(),
            depends: self.depends.clone(),
            groups: self.declared_groups.clone(),
        }
    }

    /// Rebuilds an item from its durable record.
    ///
    /// Self references found in a hand-edited record are dropped.
    pub fn from_record(record: ItemRecord) -> Self {
        let mut item = Self::new(record.number, &record.name);
        item.status = record.status;
        item.created = record.created;
        item.updated = record.updated;
        item.release = record.release;
        item.discussion = record.discussion;
        item.external_ref = record.issue;
        item.body = record.body;
        item.declared_groups = record.groups;
        for number in record.related {
            item.add_related(number);
        }
        for number in record.depends {
            item.add_depends(number);
        }
        item
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number && self.name == other.name
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
        self.name.hash(state);
    }
}

/// Membership key held by groups: the item identity without its payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberRef {
    pub number: ItemNumber,
    pub name: String,
}

/// Durable, serializable shape of one JEP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub number: ItemNumber,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub discussion: Option<String>,
    /// Serialized as `issue` to match the tracker naming.
    #[serde(default)]
    pub issue: Option<ForeignId>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub related: BTreeSet<ItemNumber>,
    #[serde(default)]
    pub depends: BTreeSet<ItemNumber>,
    #[serde(default)]
    pub groups: BTreeSet<String>,
}

fn display_name(number: ItemNumber, title: &str) -> String {
    let numbered_prefix = format!("{ITEM_TITLE_LABEL} {number}:");
    title
        .replace(numbered_prefix.as_str(), "")
        .replace(UNNUMBERED_TITLE_PREFIX, "")
        .trim()
        .to_string()
}
