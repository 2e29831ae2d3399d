//! Document Store Port - Whole-Document Load/Save Interface
//!
//! A document is the complete persisted tree for one configuration
//! class. Stores load and save documents as a unit: there are no
//! partial or delta writes. Stores are the only components that touch
//! storage; repositories never open files themselves.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Where a document lives: its data file and the schema it must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
  /// Path of the data file.
  pub data_path: PathBuf,
  /// Path of the schema file validated against on every load.
  pub schema_path: PathBuf,
}

impl DocumentLocation {
  /// Create a location from a data path and a schema path.
  pub fn new(data_path: impl Into<PathBuf>, schema_path: impl Into<PathBuf>) -> Self {
    Self {
      data_path: data_path.into(),
      schema_path: schema_path.into(),
    }
  }

  /// Resolve `data_file` and `schema_file` inside `dir`.
  pub fn in_dir(dir: impl AsRef<Path>, data_file: &str, schema_file: &str) -> Self {
    let dir = dir.as_ref();
    Self::new(dir.join(data_file), dir.join(schema_file))
  }
}

/// Failures raised while loading or saving a document.
///
/// None of these are recoverable for the operation in progress; they
/// propagate to the caller unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
  /// A data or schema file is missing, unreadable or unwritable.
  #[error("I/O error on {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The data file does not conform to its schema.
  #[error("{} failed validation: {}", path.display(), errors.join("; "))]
  Validation { path: PathBuf, errors: Vec<String> },

  /// The schema file is not a usable JSON Schema.
  #[error("invalid schema {}: {reason}", path.display())]
  InvalidSchema { path: PathBuf, reason: String },

  /// The in-memory tree could not be serialized.
  #[error("serialization error: {0}")]
  Serialization(String),
}

impl StoreError {
  /// Whether this is a document content problem (corrupt or hand-edited file).
  pub const fn is_validation(&self) -> bool {
    matches!(self, Self::Validation { .. })
  }

  /// Whether this is a storage access problem.
  pub const fn is_io(&self) -> bool {
    matches!(self, Self::Io { .. })
  }
}

/// Loads and saves whole documents of shape `D`.
///
/// Implementations must never leave a partially written data file
/// visible to later loads.
pub trait DocumentStore<D>: Send + Sync {
  /// Read the data file, validate it against the schema, and produce the typed tree.
  fn load(&self, location: &DocumentLocation) -> Result<D, StoreError>;

  /// Serialize the full tree and replace the data file with it.
  fn save(&self, document: &D, location: &DocumentLocation) -> Result<(), StoreError>;
}
