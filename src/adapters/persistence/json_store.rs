//! JSON Document Store - Schema-Validated Whole-Document Persistence
//!
//! Loads a JSON data file, validates it against its JSON Schema, then
//! deserializes it into the typed document tree. Saves use atomic
//! writes (write to tmp file, then rename) so a reader only ever sees
//! the old or the new document, never a partial one.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::ports::document_store::{DocumentLocation, DocumentStore, StoreError};

/// JSON + JSON Schema document store.
///
/// Stateless: the schema is read and compiled on every load so that an
/// edited schema file takes effect immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocumentStore;

impl JsonDocumentStore {
    pub const fn new() -> Self {
        Self
    }

    fn read(path: &Path) -> Result<Vec<u8>, StoreError> {
        fs::read(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn compile_schema(path: &Path) -> Result<jsonschema::Validator, StoreError> {
        let invalid = |reason: String| StoreError::InvalidSchema {
            path: path.to_path_buf(),
            reason,
        };

        let bytes = Self::read(path)?;
        let schema: Value = serde_json::from_slice(&bytes).map_err(|e| invalid(e.to_string()))?;
        jsonschema::validator_for(&schema).map_err(|e| invalid(e.to_string()))
    }

    /// Parse and validate the data file, collecting every violation.
    fn validated_value(
        validator: &jsonschema::Validator,
        path: &Path,
    ) -> Result<Value, StoreError> {
        let bytes = Self::read(path)?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|e| StoreError::Validation {
            path: path.to_path_buf(),
            errors: vec![e.to_string()],
        })?;

        Self::check(validator, &value, path)?;
        Ok(value)
    }

    /// Every schema violation in `value`, reported against `path`.
    fn check(
        validator: &jsonschema::Validator,
        value: &Value,
        path: &Path,
    ) -> Result<(), StoreError> {
        let errors: Vec<String> = validator
            .iter_errors(value)
            .map(|e| format!("{}: {e}", e.instance_path))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation {
                path: path.to_path_buf(),
                errors,
            })
        }
    }
}

/// `strategies.json` → `strategies.json.tmp`, in the same directory so
/// the rename never crosses filesystems.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Flush the directory entry so the rename itself survives a crash.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => File::open(dir)?.sync_all(),
        _ => File::open(".")?.sync_all(),
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl<D> DocumentStore<D> for JsonDocumentStore
where
    D: Serialize + DeserializeOwned,
{
    #[instrument(skip(self), fields(path = %location.data_path.display()))]
    fn load(&self, location: &DocumentLocation) -> Result<D, StoreError> {
        let validator = Self::compile_schema(&location.schema_path)?;

        let value = Self::validated_value(&validator, &location.data_path).inspect_err(|e| {
            if e.is_validation() {
                warn!(error = %e, "Document rejected by schema");
            }
        })?;

        // The schema can be looser than the typed tree (e.g. a widened type);
        // a mismatch here is still a content problem, not a bug.
        let document = serde_json::from_value(value).map_err(|e| StoreError::Validation {
            path: location.data_path.clone(),
            errors: vec![e.to_string()],
        })?;

        debug!("Document loaded");
        Ok(document)
    }

    #[instrument(skip(self, document), fields(path = %location.data_path.display()))]
    fn save(&self, document: &D, location: &DocumentLocation) -> Result<(), StoreError> {
        let value =
            serde_json::to_value(document).map_err(|e| StoreError::Serialization(e.to_string()))?;

        // A document that would not load back is never written.
        let validator = Self::compile_schema(&location.schema_path)?;
        Self::check(&validator, &value, &location.data_path).inspect_err(|e| {
            warn!(error = %e, "Document rejected by schema, nothing written");
        })?;

        // Serialized from the typed tree to keep field order.
        let mut json = serde_json::to_vec_pretty(document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        json.push(b'\n');

        // Write to tmp file
        let tmp_path = tmp_path_for(&location.data_path);
        write_synced(&tmp_path, &json).map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

        // Atomic rename
        if let Err(source) = fs::rename(&tmp_path, &location.data_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Io {
                path: location.data_path.clone(),
                source,
            });
        }

        // The new document is already in place; only durability is at stake.
        if let Err(e) = sync_parent_dir(&location.data_path) {
            warn!(error = %e, "Failed to sync datastore directory");
        }

        info!(bytes = json.len(), "Document saved");
        Ok(())
    }
}
