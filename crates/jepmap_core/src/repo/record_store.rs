//! JSON record files for finished JEPs.
//!
//! # Responsibility
//! - Write one `<number>.json` file per JEP after resolution.
//! - Reload the directory for the search server, ordered by number.
//!
//! # Invariants
//! - Files without the `.json` suffix are ignored on load.
//! - A reloaded record rebuilds an item equivalent to the saved one.

use crate::model::item::{Item, ItemRecord};
use crate::repo::entity_store::EntityStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

const RECORD_SUFFIX: &str = "json";

pub type RecordResult<T> = Result<T, RecordError>;

/// Record directory error.
#[derive(Debug)]
pub enum RecordError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "record i/o failed for `{}`: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "invalid JEP record `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Writes every JEP in `store` to `dir`, creating the directory if needed.
///
/// Returns the number of records written.
pub fn save_records(dir: &Path, store: &EntityStore) -> RecordResult<usize> {
    fs::create_dir_all(dir).map_err(|source| RecordError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = 0;
    for record in store.item_records() {
        let path = dir.join(format!("{}.{RECORD_SUFFIX}", record.number));
        let json = serde_json::to_string_pretty(&record).map_err(|source| RecordError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| RecordError::Io {
            path: path.clone(),
            source,
        })?;
        written += 1;
    }

    info!(
        "event=records_saved module=records status=ok count={written} dir={}",
        dir.display()
    );
    Ok(written)
}

/// Loads every JEP record in `dir`, ascending by number.
pub fn load_records(dir: &Path) -> RecordResult<Vec<Item>> {
    let entries = fs::read_dir(dir).map_err(|source| RecordError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut items = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| RecordError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() || !has_record_suffix(&path) {
            continue;
        }

        let contents = fs::read_to_string(&path).map_err(|source| RecordError::Io {
            path: path.clone(),
            source,
        })?;
        let record: ItemRecord =
            serde_json::from_str(&contents).map_err(|source| RecordError::Json {
                path: path.clone(),
                source,
            })?;
        items.push(Item::from_record(record));
    }

    items.sort_by_key(Item::number);
    info!(
        "event=records_loaded module=records status=ok count={} dir={}",
        items.len(),
        dir.display()
    );
    Ok(items)
}

fn has_record_suffix(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RECORD_SUFFIX))
}
