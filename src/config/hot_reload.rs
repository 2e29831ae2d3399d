//! Document Hot-Reload — Watch the Configuration Documents for Changes
//!
//! Periodically re-reads the strategies, markets and exchange data
//! files and compares them with what was last published. If anything
//! changed, reloads a full `ConfigSnapshot` and broadcasts it via a
//! `tokio::sync::watch` channel, so the trading engine can pick up new
//! configuration without restarting.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, instrument, warn};

use crate::adapters::persistence::ConfigRepositories;
use crate::usecases::snapshot::ConfigSnapshot;

/// Watches the data files and broadcasts reloaded snapshots.
///
/// Polls rather than using a filesystem watcher, which has portability
/// issues across Linux/macOS/Docker volumes. A missing file hashes
/// differently from any present one, so deletion is noticed too.
pub struct DocumentWatcher {
    /// Repositories used to reload.
    repositories: ConfigRepositories,
    /// Data files to poll.
    paths: Vec<PathBuf>,
    /// Time between polls.
    interval: Duration,
    /// Watch channel sender for snapshot updates.
    snapshot_tx: watch::Sender<ConfigSnapshot>,
    /// Hash of the file contents behind the last published snapshot.
    last_hash: Option<u64>,
}

impl DocumentWatcher {
    /// Create a new document watcher.
    ///
    /// Returns the watcher and a `watch::Receiver` that consumers
    /// can use to get notified of configuration changes.
    pub fn new(
        repositories: ConfigRepositories,
        initial: ConfigSnapshot,
        interval: Duration,
    ) -> (Self, watch::Receiver<ConfigSnapshot>) {
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);
        let paths = repositories.data_paths();

        let watcher = Self {
            repositories,
            paths,
            interval,
            snapshot_tx,
            last_hash: None,
        };

        (watcher, snapshot_rx)
    }

    /// Run the watcher loop until shutdown.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(&mut self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        info!(
            files = self.paths.len(),
            interval_secs = self.interval.as_secs(),
            "Document watcher started"
        );

        // The initial snapshot was loaded from the current contents.
        self.last_hash = Some(self.compute_hash().await);

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    info!("Document watcher shutting down");
                    return Ok(());
                }
                () = tokio::time::sleep(self.interval) => {
                    self.check_and_reload().await;
                }
            }
        }
    }

    /// Reload and publish if any data file changed.
    ///
    /// Returns whether a new snapshot was published.
    pub(crate) async fn check_and_reload(&mut self) -> bool {
        let new_hash = self.compute_hash().await;

        if Some(new_hash) == self.last_hash {
            debug!("Documents unchanged");
            return false;
        }

        info!("Document change detected, reloading...");

        let repositories = self.repositories.clone();
        let reloaded = tokio::task::spawn_blocking(move || repositories.snapshot()).await;

        match reloaded {
            Ok(Ok(snapshot)) => {
                self.last_hash = Some(new_hash);
                if self.snapshot_tx.send(snapshot).is_err() {
                    warn!("No snapshot subscribers, update dropped");
                } else {
                    info!("Configuration reloaded");
                }
                true
            }
            Ok(Err(e)) => {
                // last_hash is left alone so the next poll retries.
                warn!(error = %e, "Failed to reload documents, keeping current");
                false
            }
            Err(e) => {
                warn!(error = %e, "Reload task failed, keeping current");
                false
            }
        }
    }

    /// Hash the contents of every watched file, in order.
    async fn compute_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for path in &self.paths {
            tokio::fs::read(path).await.ok().hash(&mut hasher);
        }
        hasher.finish()
    }
}
