//! Project and JEP link recognition.
//!
//! # Invariants
//! - Release-line project pages (`/projects/jdk…`) never yield an
//!   organizational group id; release lines are synthesized instead.
//! - Absolute links are only accepted on the configured site host.

use crate::model::group::GroupId;
use crate::model::item::ItemNumber;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

const PROJECTS_PATH: &str = "/projects/";
const JEPS_PATH: &str = "/jeps/";
const RELEASE_LINE_PROJECT_PREFIX: &str = "jdk";

static BODY_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s\[\]|()<>"']+"#).expect("valid body url regex"));

/// Extracts an organizational project id from a link.
pub fn group_id_from_link(link: &str, host: &str) -> Option<GroupId> {
    let link = link.trim();
    if is_absolute(link) && !link.contains(host) {
        return None;
    }

    let start = link.find(PROJECTS_PATH)? + PROJECTS_PATH.len();
    let id = strip_fragment_and_query(&link[start..])
        .trim_end_matches('/')
        .trim()
        .to_lowercase();

    if id.is_empty() || id.starts_with(RELEASE_LINE_PROJECT_PREFIX) {
        return None;
    }
    Some(id)
}

/// Extracts a JEP number from a `/jeps/<number>` link.
///
/// `/jeps/` itself and the `/jeps/0` index page are not JEP links.
pub fn item_number_from_link(link: &str) -> Option<ItemNumber> {
    let link = link.trim();
    if !link.contains(JEPS_PATH) || link == JEPS_PATH || link.ends_with("/jeps/0") {
        return None;
    }

    let last = link.rsplit('/').next()?;
    strip_fragment_and_query(last).parse().ok()
}

/// Collects the project ids linked from a JEP body.
pub fn scan_declared_groups(body: &str, host: &str) -> BTreeSet<GroupId> {
    BODY_URL_RE
        .find_iter(body)
        .map(|found| found.as_str().trim_end_matches(['.', ',', ';', ':']))
        .filter_map(|url| group_id_from_link(url, host))
        .collect()
}

fn is_absolute(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://")
}

fn strip_fragment_and_query(value: &str) -> &str {
    let end = value.find(['#', '?']).unwrap_or(value.len());
    &value[..end]
}

#[cfg(test)]
mod tests {
    use super::{group_id_from_link, item_number_from_link, scan_declared_groups};

    const HOST: &str = "openjdk.java.net";

    #[test]
    fn relative_and_absolute_project_links_yield_ids() {
        assert_eq!(group_id_from_link("/projects/Valhalla", HOST).as_deref(), Some("valhalla"));
        assert_eq!(
            group_id_from_link("https://openjdk.java.net/projects/amber/#goals", HOST).as_deref(),
            Some("amber")
        );
    }

    #[test]
    fn foreign_hosts_index_and_release_lines_are_rejected() {
        assert!(group_id_from_link("https://example.com/projects/amber", HOST).is_none());
        assert!(group_id_from_link("/projects/", HOST).is_none());
        assert!(group_id_from_link("/projects/jdk/17", HOST).is_none());
        assert!(group_id_from_link("/groups/hotspot", HOST).is_none());
    }

    #[test]
    fn jep_links_parse_numbers() {
        assert_eq!(item_number_from_link("https://openjdk.java.net/jeps/286"), Some(286));
        assert_eq!(item_number_from_link("/jeps/358#Motivation"), Some(358));
        assert_eq!(item_number_from_link("/jeps/"), None);
        assert_eq!(item_number_from_link("/jeps/0"), None);
        assert_eq!(item_number_from_link("/jeps/draft"), None);
    }

    #[test]
    fn body_scan_finds_project_links_only() {
        let body = "Developed in [Project Loom|https://openjdk.java.net/projects/loom]. \
                    See https://openjdk.java.net/jeps/425 and https://openjdk.java.net/projects/amber/.";
        let ids = scan_declared_groups(body, HOST);
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["amber", "loom"]);
    }
}
