//! "Must not map" override rules.
//!
//! Source format is a flat properties file:
//!
//! ```text
//! # JEP number = comma separated project ids
//! 286 = valhalla, jdk/10
//! 8130200 = *
//! ```
//!
//! The `*` token forbids every project for that JEP.

use crate::model::group::normalize_group_id;
use crate::model::item::ItemNumber;
use log::info;
use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Token forbidding all project memberships for a JEP.
pub const WILDCARD: &str = "*";

/// Rules loading error. Every variant is a fatal configuration error.
#[derive(Debug)]
pub enum OverrideRulesError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidItemNumber {
        line: usize,
        value: String,
    },
}

impl Display for OverrideRulesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "couldn't load override rules `{}`: {source}", path.display())
            }
            Self::InvalidItemNumber { line, value } => {
                write!(f, "override rule on line {line} has invalid JEP number `{value}`")
            }
        }
    }
}

impl Error for OverrideRulesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidItemNumber { .. } => None,
        }
    }
}

/// Loaded override rules, keyed by JEP number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideRules {
    rules: HashMap<ItemNumber, BTreeSet<String>>,
}

impl OverrideRules {
    /// Reads and parses the rules file at `path`.
    pub fn load(path: &Path) -> Result<Self, OverrideRulesError> {
        let source = std::fs::read_to_string(path).map_err(|source| OverrideRulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Parses rules from properties-style text.
    pub fn parse(source: &str) -> Result<Self, OverrideRulesError> {
        let mut rules = HashMap::new();

        for (index, raw_line) in source.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let (key, value) = match line.find(['=', ':']) {
                Some(split) => (&line[..split], &line[split + 1..]),
                None => (line, ""),
            };
            let key = key.trim();
            let number = key
                .parse::<ItemNumber>()
                .map_err(|_| OverrideRulesError::InvalidItemNumber {
                    line: index + 1,
                    value: key.to_string(),
                })?;

            let group_ids = value
                .split(',')
                .map(normalize_group_id)
                .filter(|id| !id.is_empty())
                .collect::<BTreeSet<_>>();

            if group_ids.is_empty() {
                rules.remove(&number);
                continue;
            }

            info!(
                "event=override_rule_loaded module=rules status=ok number={number} forbidden={}",
                group_ids.iter().cloned().collect::<Vec<_>>().join(",")
            );
            rules.insert(number, group_ids);
        }

        Ok(Self { rules })
    }

    /// Returns whether JEP `number` must not be a member of `group_id`.
    pub fn forbids(&self, number: ItemNumber, group_id: &str) -> bool {
        self.rules.get(&number).is_some_and(|forbidden| {
            forbidden.contains(WILDCARD) || forbidden.contains(normalize_group_id(group_id).as_str())
        })
    }

    /// Forbidden project ids for JEP `number`, if it has a rule.
    pub fn forbidden_for(&self, number: ItemNumber) -> Option<&BTreeSet<String>> {
        self.rules.get(&number)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{OverrideRules, OverrideRulesError};

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let rules = OverrideRules::parse("# header\n\n! legacy comment\n286=valhalla\n").unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules.forbids(286, "valhalla"));
        assert!(!rules.forbids(286, "amber"));
    }

    #[test]
    fn parse_trims_and_lowercases_ids_and_accepts_colon_separator() {
        let rules = OverrideRules::parse("300 : Amber , JDK/10,,\n").unwrap();
        let forbidden = rules.forbidden_for(300).unwrap();
        assert_eq!(
            forbidden.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["amber", "jdk/10"]
        );
        assert!(rules.forbids(300, "AMBER"));
    }

    #[test]
    fn entries_without_ids_are_absent() {
        let rules = OverrideRules::parse("400=\n401= , \n").unwrap();
        assert!(rules.is_empty());
        assert!(rules.forbidden_for(400).is_none());
    }

    #[test]
    fn later_duplicate_key_wins() {
        let rules = OverrideRules::parse("500=amber\n500=loom\n").unwrap();
        assert!(!rules.forbids(500, "amber"));
        assert!(rules.forbids(500, "loom"));
    }

    #[test]
    fn non_numeric_key_is_rejected() {
        let err = OverrideRules::parse("286=amber\nabc=loom\n").unwrap_err();
        assert!(matches!(
            err,
            OverrideRulesError::InvalidItemNumber { line: 2, ref value } if value == "abc"
        ));
    }
}
