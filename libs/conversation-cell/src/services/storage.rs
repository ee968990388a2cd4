//! Per-patient JSON array files. Every write rewrites the whole file, so two
//! writers appending to the same patient concurrently can lose an entry.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ConversationError;

/// Patient keys become file names, so they are limited to ASCII
/// alphanumerics, `-` and `_`.
pub fn validate_key(patient_id: &str) -> Result<(), ConversationError> {
    let valid = !patient_id.is_empty()
        && patient_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ConversationError::InvalidKey(patient_id.to_string()))
    }
}

pub fn keyed_path(dir: &Path, patient_id: &str, suffix: &str) -> Result<PathBuf, ConversationError> {
    validate_key(patient_id)?;
    Ok(dir.join(format!("{}{}", patient_id, suffix)))
}

/// Reads a JSON array; a missing file is an empty array.
pub fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ConversationError> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(serde_json::from_str(&raw)?),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(err.into()),
    }
}

pub fn write_array<T: Serialize>(path: &Path, items: &[T]) -> Result<(), ConversationError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(items)?)?;
    Ok(())
}

/// Keys of every `<key><suffix>` file in `dir`, sorted. A missing directory
/// has no keys; files whose key would not pass [`validate_key`] are skipped.
pub fn list_keys(dir: &Path, suffix: &str) -> Result<Vec<String>, ConversationError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut keys = Vec::new();
    for entry in entries {
        let file_name = entry?.file_name();
        if let Some(key) = file_name.to_str().and_then(|name| name.strip_suffix(suffix)) {
            if validate_key(key).is_ok() {
                keys.push(key.to_string());
            }
        }
    }
    keys.sort();
    Ok(keys)
}
