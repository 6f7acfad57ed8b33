//! Engine configuration.
//!
//! # Responsibility
//! - Collect the tunable constants of reconciliation and search in one
//!   serde-backed shape.
//! - Load overrides from a JSON file; every missing field falls back to its
//!   default.

use crate::model::group::ReleaseLineConfig;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Configuration loading and validation error.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Corpus search limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Characters kept on each side of a match before word trimming.
    pub context_radius: usize,
    /// Queries shorter than this are rejected.
    pub min_query_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            context_radius: 80,
            min_query_chars: 3,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub release_lines: ReleaseLineConfig,
    pub search: SearchConfig,
    /// Host whose `/projects/` links count as organizational groups.
    pub site_host: String,
    /// Tracker issue type of JEPs; links to other issue types are ignored.
    pub item_issue_type: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            release_lines: ReleaseLineConfig::default(),
            search: SearchConfig::default(),
            site_host: "openjdk.java.net".to_string(),
            item_issue_type: "JEP".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the JSON config at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let lines = &self.release_lines;
        if lines.prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "release_lines.prefix cannot be empty".to_string(),
            ));
        }
        if lines.first_major > lines.last_major {
            return Err(ConfigError::Invalid(format!(
                "release_lines.first_major ({}) must be <= last_major ({})",
                lines.first_major, lines.last_major
            )));
        }
        if self.search.context_radius == 0 {
            return Err(ConfigError::Invalid(
                "search.context_radius must be positive".to_string(),
            ));
        }
        if self.search.min_query_chars == 0 {
            return Err(ConfigError::Invalid(
                "search.min_query_chars must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, EngineConfig};

    #[test]
    fn empty_document_yields_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.search.context_radius, 80);
        assert_eq!(config.search.min_query_chars, 3);
        assert_eq!(config.release_lines.separator_threshold, 10);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config =
            EngineConfig::from_json_str(r#"{"release_lines": {"last_major": 21}}"#).unwrap();
        assert_eq!(config.release_lines.last_major, 21);
        assert_eq!(config.release_lines.first_major, 6);
        assert_eq!(config.release_lines.prefix, "jdk");
    }

    #[test]
    fn inverted_release_range_is_rejected() {
        let err = EngineConfig::from_json_str(
            r#"{"release_lines": {"first_major": 20, "last_major": 10}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("jepmap.json");
        std::fs::write(&path, r#"{"search": {"context_radius": 40}}"#).expect("write config");

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.search.context_radius, 40);
        assert_eq!(config.site_host, "openjdk.java.net");

        let err = EngineConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = EngineConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
