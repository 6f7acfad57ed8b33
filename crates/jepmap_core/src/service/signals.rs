//! Membership signal heuristics.
//!
//! Each function turns one JEP field into a project id candidate. They are
//! pure so every decision point can be tested in isolation.

use crate::model::group::{GroupId, ReleaseLineConfig};
use crate::model::item::Item;

const DEV_LIST_SUFFIX: &str = "-dev";
const UNSCHEDULED_RELEASE: &str = "tbd";

/// Decodes word-encoded punctuation and drops the `-dev` list suffix.
///
/// `"foo dash bar at example dot com"` becomes `"foo-bar@example.com"` and
/// `"hotspot-gc-dev"` becomes `"hotspot-gc"`.
pub fn normalize_discussion_channel(raw: &str) -> String {
    let decoded = raw
        .replace(" dash ", "-")
        .replace(" at ", "@")
        .replace(" dot ", ".");
    let decoded = decoded.trim();

    match decoded.split_once('@') {
        Some((local, domain)) => {
            let local = local.trim();
            let local = local.strip_suffix(DEV_LIST_SUFFIX).unwrap_or(local);
            format!("{local}@{}", domain.trim())
        }
        None => decoded
            .strip_suffix(DEV_LIST_SUFFIX)
            .unwrap_or(decoded)
            .to_string(),
    }
}

/// Project id suggested by a discussion list.
///
/// Channels given without a domain are used whole.
pub fn discussion_group_candidate(raw: &str) -> Option<GroupId> {
    let normalized = normalize_discussion_channel(raw);
    let candidate = match normalized.split_once('@') {
        Some((local, _)) => local,
        None => normalized.as_str(),
    };
    let candidate = candidate.trim().to_lowercase();
    (!candidate.is_empty()).then_some(candidate)
}

/// Leading major version of a release label.
///
/// `"17-ea"` yields 17; empty, `tbd` and non-numeric labels yield nothing.
pub fn release_major_version(raw: &str) -> Option<u32> {
    let release = raw.trim();
    if release.is_empty() || release.eq_ignore_ascii_case(UNSCHEDULED_RELEASE) {
        return None;
    }

    let digits_end = release
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(release.len());
    release[..digits_end].parse().ok()
}

/// Release-line project id suggested by a release label.
pub fn release_group_candidate(raw: &str, config: &ReleaseLineConfig) -> Option<GroupId> {
    release_major_version(raw).map(|major| config.group_id(major))
}

/// Project ids declared in the JEP body.
pub fn declared_group_candidates(item: &Item) -> impl Iterator<Item = &str> {
    item.declared_groups.iter().map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::{
        discussion_group_candidate, normalize_discussion_channel, release_group_candidate,
        release_major_version,
    };
    use crate::model::group::ReleaseLineConfig;

    #[test]
    fn word_encoded_address_is_decoded() {
        assert_eq!(
            normalize_discussion_channel("foo dash bar at example dot com"),
            "foo-bar@example.com"
        );
        assert_eq!(
            discussion_group_candidate("foo dash bar at example dot com").as_deref(),
            Some("foo-bar")
        );
    }

    #[test]
    fn dev_suffix_is_stripped_from_local_part() {
        assert_eq!(
            discussion_group_candidate("valhalla dash dev at openjdk dot java dot net").as_deref(),
            Some("valhalla")
        );
        assert_eq!(normalize_discussion_channel("hotspot-gc-dev"), "hotspot-gc");
        assert_eq!(
            discussion_group_candidate("hotspot-gc-dev").as_deref(),
            Some("hotspot-gc")
        );
    }

    #[test]
    fn dev_inside_a_name_is_kept() {
        assert_eq!(
            discussion_group_candidate("devtools-dev@openjdk.java.net").as_deref(),
            Some("devtools")
        );
    }

    #[test]
    fn blank_channel_has_no_candidate() {
        assert_eq!(discussion_group_candidate("   "), None);
        assert_eq!(discussion_group_candidate("-dev"), None);
    }

    #[test]
    fn release_major_version_reads_leading_digits() {
        assert_eq!(release_major_version("17-ea"), Some(17));
        assert_eq!(release_major_version("9"), Some(9));
        assert_eq!(release_major_version("11.0.2"), Some(11));
        assert_eq!(release_major_version("tbd"), None);
        assert_eq!(release_major_version("TBD"), None);
        assert_eq!(release_major_version(""), None);
        assert_eq!(release_major_version("ea-17"), None);
    }

    #[test]
    fn release_candidate_uses_release_line_ids() {
        let config = ReleaseLineConfig::default();
        assert_eq!(release_group_candidate("17-ea", &config).as_deref(), Some("jdk/17"));
        assert_eq!(release_group_candidate("9", &config).as_deref(), Some("jdk9"));
        assert_eq!(release_group_candidate("tbd", &config), None);
    }
}
