//! Entity store for JEPs and projects.
//!
//! The store is an explicit context object constructed once per run and
//! passed by reference to the resolver, the reconciler and the renderers.

use crate::model::group::{normalize_group_id, Group, GroupId};
use crate::model::item::{Item, ItemNumber, ItemRecord};
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Lookup error for store reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    ItemNotFound(ItemNumber),
    GroupNotFound(GroupId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound(number) => write!(f, "JEP not found: {number}"),
            Self::GroupNotFound(id) => write!(f, "project not found: {id}"),
        }
    }
}

impl Error for RepoError {}

/// Canonical JEP and project collections.
#[derive(Debug, Default)]
pub struct EntityStore {
    items: BTreeMap<ItemNumber, Item>,
    groups: Vec<Group>,
    group_index: HashMap<GroupId, usize>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a JEP, replacing and returning any JEP with the same number.
    pub fn put_item(&mut self, item: Item) -> Option<Item> {
        let number = item.number();
        let previous = self.items.insert(number, item);
        if previous.is_some() {
            debug!("event=item_replaced module=store status=ok number={number}");
        }
        previous
    }

    pub fn get_item(&self, number: ItemNumber) -> RepoResult<&Item> {
        self.items
            .get(&number)
            .ok_or(RepoError::ItemNotFound(number))
    }

    pub fn get_item_mut(&mut self, number: ItemNumber) -> RepoResult<&mut Item> {
        self.items
            .get_mut(&number)
            .ok_or(RepoError::ItemNotFound(number))
    }

    pub fn contains_item(&self, number: ItemNumber) -> bool {
        self.items.contains_key(&number)
    }

    /// JEPs ascending by number.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub(crate) fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.values_mut()
    }

    pub fn item_numbers(&self) -> Vec<ItemNumber> {
        self.items.keys().copied().collect()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Inserts a project, replacing and returning any project with the same id.
    ///
    /// A replaced project keeps its original position in iteration order.
    pub fn put_group(&mut self, group: Group) -> Option<Group> {
        match self.group_index.get(group.id()) {
            Some(&slot) => {
                debug!(
                    "event=group_replaced module=store status=ok group={}",
                    group.id()
                );
                Some(std::mem::replace(&mut self.groups[slot], group))
            }
            None => {
                self.group_index
                    .insert(group.id().to_string(), self.groups.len());
                self.groups.push(group);
                None
            }
        }
    }

    pub fn get_group(&self, id: &str) -> RepoResult<&Group> {
        let id = normalize_group_id(id);
        self.group_index
            .get(&id)
            .map(|&slot| &self.groups[slot])
            .ok_or(RepoError::GroupNotFound(id))
    }

    pub fn get_group_mut(&mut self, id: &str) -> RepoResult<&mut Group> {
        let id = normalize_group_id(id);
        match self.group_index.get(&id) {
            Some(&slot) => Ok(&mut self.groups[slot]),
            None => Err(RepoError::GroupNotFound(id)),
        }
    }

    pub fn contains_group(&self, id: &str) -> bool {
        self.group_index.contains_key(&normalize_group_id(id))
    }

    /// Projects in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub(crate) fn groups_mut(&mut self) -> impl Iterator<Item = &mut Group> {
        self.groups.iter_mut()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Projects JEP `number` belongs to, in insertion order.
    pub fn groups_for_item(&self, number: ItemNumber) -> Vec<&Group> {
        self.groups
            .iter()
            .filter(|group| group.has_member(number))
            .collect()
    }

    /// Durable records of every JEP, ascending by number.
    pub fn item_records(&self) -> Vec<ItemRecord> {
        self.items.values().map(Item::to_record).collect()
    }
}
