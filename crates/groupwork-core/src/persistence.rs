//! Save/Load functionality for persisting classroom state
//!
//! Two formats are supported:
//! - A versioned bincode snapshot of the whole classroom, for native
//!   callers that own a file or buffer.
//! - Key/value JSON entries matching the browser local-storage layout, so
//!   a web front end can keep writing the same keys it always has.

use std::io::{Read, Write};

use groupwork_logic::config::GroupConfig;
use groupwork_logic::group::GroupSet;
use groupwork_logic::locks::{FixedSlots, LockedMembers};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Local-storage key holding the roster.
pub const NAMES_KEY: &str = "teacherDashboardNames";
/// Local-storage key holding the group set.
pub const GROUPS_KEY: &str = "teacherDashboardGroups";
/// Local-storage key holding fixed slot ids.
pub const FIXED_KEY: &str = "teacherDashboardFixedGroups";
/// Local-storage key holding member locks.
pub const LOCKED_KEY: &str = "teacherDashboardLockedMembers";

/// Serializable snapshot of a classroom
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    pub roster: Vec<String>,
    pub selection: Vec<String>,
    pub config: GroupConfig,
    pub locked: LockedMembers,
    pub fixed: FixedSlots,
    pub groups: GroupSet,
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("JSON error in {key}: {source}")]
    Json {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Write a snapshot to a writer
pub fn save_classroom<W: Write>(writer: W, data: &SaveData) -> Result<(), SaveError> {
    let stamped = SaveData {
        version: SAVE_VERSION,
        ..data.clone()
    };
    bincode::serialize_into(writer, &stamped)?;
    Ok(())
}

/// Read a snapshot from a reader
pub fn load_classroom<R: Read>(reader: R) -> Result<SaveData, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    Ok(save_data)
}

/// State as JSON key/value pairs.
///
/// The groups entry is skipped while there are no groups, so a cleared
/// board never overwrites the last stored groups with an empty list.
pub fn export_entries(data: &SaveData) -> Result<Vec<(&'static str, String)>, SaveError> {
    let mut entries = vec![(NAMES_KEY, to_json(NAMES_KEY, &data.roster)?)];
    if !data.groups.is_empty() {
        entries.push((GROUPS_KEY, to_json(GROUPS_KEY, &data.groups)?));
    }
    entries.push((FIXED_KEY, to_json(FIXED_KEY, &data.fixed)?));
    entries.push((LOCKED_KEY, to_json(LOCKED_KEY, &data.locked)?));
    Ok(entries)
}

/// Rebuild state from whichever storage keys `lookup` can find.
///
/// Missing keys leave the matching field at its default. Selection and
/// group settings are not part of the storage layout and stay default.
pub fn import_entries<F>(lookup: F) -> Result<SaveData, SaveError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut data = SaveData {
        version: SAVE_VERSION,
        ..SaveData::default()
    };
    if let Some(raw) = lookup(NAMES_KEY) {
        data.roster = from_json(NAMES_KEY, &raw)?;
    }
    if let Some(raw) = lookup(GROUPS_KEY) {
        data.groups = from_json(GROUPS_KEY, &raw)?;
    }
    if let Some(raw) = lookup(FIXED_KEY) {
        data.fixed = from_json(FIXED_KEY, &raw)?;
    }
    if let Some(raw) = lookup(LOCKED_KEY) {
        data.locked = from_json(LOCKED_KEY, &raw)?;
    }
    Ok(data)
}

fn to_json<T: Serialize>(key: &'static str, value: &T) -> Result<String, SaveError> {
    serde_json::to_string(value).map_err(|source| SaveError::Json { key, source })
}

fn from_json<T: for<'de> Deserialize<'de>>(key: &'static str, raw: &str) -> Result<T, SaveError> {
    serde_json::from_str(raw).map_err(|source| SaveError::Json { key, source })
}
