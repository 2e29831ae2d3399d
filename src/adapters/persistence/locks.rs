//! Per-File Write Locks
//!
//! Every load → mutate → save sequence against a data file runs while
//! holding that file's lock, so two concurrent writers can never both
//! start from the same pre-mutation document. Locks are process-wide
//! and keyed by absolute path: repositories built independently for
//! the same file still serialize against each other.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

static LOCKS: LazyLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// The write lock shared by everyone writing `data_path`.
pub fn document_lock(data_path: &Path) -> Arc<Mutex<()>> {
    let key = std::path::absolute(data_path).unwrap_or_else(|_| data_path.to_path_buf());

    // The registry only ever inserts, so a poisoned map is still consistent.
    let mut locks = LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(key).or_default())
}
