//! Repository Port - Configuration CRUD Interface
//!
//! Every call reads the backing document fresh and, when it mutates,
//! rewrites it in full. Routine misses are not errors: a lookup that
//! finds nothing yields `None`, and a write that cannot apply yields
//! [`Outcome::NotFound`] or [`Outcome::Conflict`]. `Err` is reserved
//! for storage and validation faults.

use thiserror::Error;

use super::document_store::StoreError;
use crate::domain::ExchangeConfig;

/// Result of a create, update or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
  /// The operation applied. Carries the persisted entity (for delete,
  /// the entity as it was just before removal).
  Found(T),
  /// Update or delete named an identifier that does not exist.
  NotFound,
  /// Create named an identifier that already exists.
  Conflict,
}

impl<T> Outcome<T> {
  /// Whether the operation applied.
  pub const fn is_found(&self) -> bool {
    matches!(self, Self::Found(_))
  }

  /// The entity, if the operation applied.
  pub fn into_option(self) -> Option<T> {
    match self {
      Self::Found(entity) => Some(entity),
      Self::NotFound | Self::Conflict => None,
    }
  }
}

/// A persisted entry could not be turned into its caller-facing form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entry '{entry}' is malformed: {reason}")]
pub struct MappingError {
  /// Identifier (or name) of the offending entry.
  pub entry: String,
  /// What is wrong with it.
  pub reason: String,
}

/// Faults surfaced by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error(transparent)]
  Store(#[from] StoreError),

  #[error(transparent)]
  Malformed(#[from] MappingError),

  /// The entry was written but is missing when the document is read back.
  #[error("entry '{id}' not found after save")]
  WriteNotConfirmed { id: String },

  #[error("document write lock was poisoned")]
  LockPoisoned,
}

/// CRUD over a document holding an ordered collection of identified entries.
pub trait ConfigRepository<T>: Send + Sync {
  /// All entries, in persisted order.
  fn find_all(&self) -> Result<Vec<T>, RepositoryError>;

  /// The first entry whose identifier equals `id`.
  fn find_by_id(&self, id: &str) -> Result<Option<T>, RepositoryError>;

  /// Append `entity` unless its identifier is already taken.
  fn create(&self, entity: &T) -> Result<Outcome<T>, RepositoryError>;

  /// Replace the mutable fields of the entry with `entity`'s identifier.
  fn update(&self, entity: &T) -> Result<Outcome<T>, RepositoryError>;

  /// Remove the entry with identifier `id`, returning what was removed.
  fn delete_by_id(&self, id: &str) -> Result<Outcome<T>, RepositoryError>;
}

/// Access to the singleton exchange document.
pub trait ExchangeConfigRepository: Send + Sync {
  /// The current exchange configuration.
  fn get(&self) -> Result<ExchangeConfig, RepositoryError>;

  /// Replace the exchange configuration, returning it as re-read from storage.
  ///
  /// Stored authentication settings are kept as they are.
  fn save(&self, config: &ExchangeConfig) -> Result<ExchangeConfig, RepositoryError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_outcome_into_option() {
    assert_eq!(Outcome::Found(3).into_option(), Some(3));
    assert_eq!(Outcome::<u8>::NotFound.into_option(), None);
    assert_eq!(Outcome::<u8>::Conflict.into_option(), None);
    assert!(Outcome::Found(()).is_found());
    assert!(!Outcome::<()>::Conflict.is_found());
  }

  #[test]
  fn test_store_error_is_transparent() {
    let err = RepositoryError::from(StoreError::Serialization("boom".to_string()));
    assert_eq!(err.to_string(), "serialization error: boom");
  }
}
