//! Config Service - Request Checks in Front of a Repository
//!
//! What an API layer must verify before a write reaches a repository:
//! the payload carries an id, and that id is the one addressed by the
//! request path. Identifiers never change through an update, so a
//! mismatch is rejected rather than interpreted as a rename.
//!
//! Mapping the outcomes to protocol responses stays with the caller:
//! `Found` → success, `NotFound` → not found, `Conflict` → conflict,
//! `ServiceError::MissingId` / `IdMismatch` → bad request.

use std::marker::PhantomData;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::domain::Identified;
use crate::ports::repository::{ConfigRepository, Outcome, RepositoryError};

/// Failures of a service call.
#[derive(Debug, Error)]
pub enum ServiceError {
  /// The payload has an empty id.
  #[error("payload id must not be empty")]
  MissingId,

  /// The payload id differs from the addressed id.
  #[error("path id '{path_id}' does not match payload id '{payload_id}'")]
  IdMismatch { path_id: String, payload_id: String },

  #[error(transparent)]
  Repository(#[from] RepositoryError),
}

/// Checked access to one configuration repository.
pub struct ConfigService<T, R> {
  /// Repository port.
  repository: Arc<R>,
  /// Entity name for log fields ("strategy", "market").
  kind: &'static str,
  _entity: PhantomData<fn() -> T>,
}

impl<T, R> ConfigService<T, R>
where
  T: Identified,
  R: ConfigRepository<T>,
{
  /// Create a service over `repository`.
  pub fn new(repository: Arc<R>, kind: &'static str) -> Self {
    Self {
      repository,
      kind,
      _entity: PhantomData,
    }
  }

  pub fn find_all(&self) -> Result<Vec<T>, ServiceError> {
    let all = self.repository.find_all()?;
    info!(kind = self.kind, count = all.len(), "Listed configuration");
    Ok(all)
  }

  pub fn find_by_id(&self, id: &str) -> Result<Option<T>, ServiceError> {
    Ok(self.repository.find_by_id(id)?)
  }

  /// Create `entity` at `path_id`.
  #[instrument(skip(self, entity), fields(kind = self.kind))]
  pub fn create(&self, path_id: &str, entity: &T) -> Result<Outcome<T>, ServiceError> {
    self.check_ids(path_id, entity)?;
    let outcome = self.repository.create(entity)?;
    info!(created = outcome.is_found(), "Create handled");
    Ok(outcome)
  }

  /// Update the entry at `path_id` with `entity`.
  #[instrument(skip(self, entity), fields(kind = self.kind))]
  pub fn update(&self, path_id: &str, entity: &T) -> Result<Outcome<T>, ServiceError> {
    self.check_ids(path_id, entity)?;
    let outcome = self.repository.update(entity)?;
    info!(updated = outcome.is_found(), "Update handled");
    Ok(outcome)
  }

  #[instrument(skip(self), fields(kind = self.kind))]
  pub fn delete_by_id(&self, id: &str) -> Result<Outcome<T>, ServiceError> {
    let outcome = self.repository.delete_by_id(id)?;
    info!(deleted = outcome.is_found(), "Delete handled");
    Ok(outcome)
  }

  fn check_ids(&self, path_id: &str, entity: &T) -> Result<(), ServiceError> {
    if entity.id().is_empty() {
      warn!(kind = self.kind, "Rejected payload without id");
      return Err(ServiceError::MissingId);
    }
    if entity.id() != path_id {
      warn!(
        kind = self.kind,
        path_id,
        payload_id = entity.id(),
        "Rejected payload with mismatched id"
      );
      return Err(ServiceError::IdMismatch {
        path_id: path_id.to_string(),
        payload_id: entity.id().to_string(),
      });
    }
    Ok(())
  }
}
