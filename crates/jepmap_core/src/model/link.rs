//! Raw issue links as delivered by the issue tracker.
//!
//! Links arrive keyed by the other issue's tracker key, long before every
//! JEP number is known. They are queued on the owning item and translated
//! later by the relationship resolver.

use crate::model::item::ForeignId;

/// Side of the link the owning issue sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDirection {
    /// The other issue points at this one (`inwardIssue`).
    Inward,
    /// This issue points at the other one (`outwardIssue`).
    Outward,
}

/// Relationship kind kept after translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Related,
    Depends,
}

/// One unresolved issue link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    /// Tracker key of the other issue, without the `JDK-` prefix.
    pub foreign_id: ForeignId,
    pub direction: LinkDirection,
    /// Tracker relation name, e.g. `Blocks` or `Relates`.
    pub relation: String,
    /// Issue type of the other issue, e.g. `JEP` or `Sub-task`.
    pub target_type: String,
}

impl RawLink {
    pub fn new(
        foreign_id: impl Into<ForeignId>,
        direction: LinkDirection,
        relation: impl Into<String>,
        target_type: impl Into<String>,
    ) -> Self {
        Self {
            foreign_id: foreign_id.into().trim().to_string(),
            direction,
            relation: relation.into(),
            target_type: target_type.into(),
        }
    }

    /// Classifies the link.
    ///
    /// Only "is blocked by" (an inward `Blocks`) becomes a dependency; an
    /// outward `Blocks` and every other relation are recorded as related.
    pub fn kind(&self) -> LinkKind {
        if self.relation.trim().eq_ignore_ascii_case("blocks")
            && self.direction == LinkDirection::Inward
        {
            LinkKind::Depends
        } else {
            LinkKind::Related
        }
    }

    /// Returns whether the other side is an issue of `item_issue_type`.
    pub fn targets_item(&self, item_issue_type: &str) -> bool {
        self.target_type.trim().eq_ignore_ascii_case(item_issue_type)
    }
}

#[cfg(test)]
mod tests {
    use super::{LinkDirection, LinkKind, RawLink};

    #[test]
    fn inward_blocks_is_a_dependency() {
        let link = RawLink::new("8300001", LinkDirection::Inward, "Blocks", "JEP");
        assert_eq!(link.kind(), LinkKind::Depends);
    }

    #[test]
    fn outward_blocks_and_relates_are_related() {
        let outward = RawLink::new("8300001", LinkDirection::Outward, "Blocks", "JEP");
        let relates = RawLink::new("8300002", LinkDirection::Inward, "Relates", "JEP");
        assert_eq!(outward.kind(), LinkKind::Related);
        assert_eq!(relates.kind(), LinkKind::Related);
    }

    #[test]
    fn target_type_match_ignores_case() {
        let link = RawLink::new("1", LinkDirection::Outward, "Relates", "jep");
        assert!(link.targets_item("JEP"));
        assert!(!RawLink::new("2", LinkDirection::Outward, "Relates", "Sub-task")
            .targets_item("JEP"));
    }
}
