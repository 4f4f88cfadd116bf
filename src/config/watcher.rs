//! Configuration file watcher for re-validation on change.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config_with;
use crate::config::schema::DeployConfig;
use crate::observability::advisory::Notifier;

/// Result of re-validating the watched file.
#[derive(Debug)]
pub enum WatchOutcome {
    Valid(Box<DeployConfig>),
    Invalid(String),
}

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    notifier: Arc<dyn Notifier>,
    update_tx: mpsc::UnboundedSender<WatchOutcome>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Advisories raised while re-validating go to `notifier`. Returns the
    /// watcher and a receiver for validation outcomes.
    pub fn new(
        path: &Path,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, mpsc::UnboundedReceiver<WatchOutcome>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                notifier,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for events to be delivered.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();
        let notifier = Arc::clone(&self.notifier);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, validating...");
                        let _ = tx.send(revalidate(&path, notifier.as_ref()));
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

/// Load and validate the file at `path`, folding any error into the outcome.
pub fn revalidate(path: &Path, notifier: &dyn Notifier) -> WatchOutcome {
    match load_config_with(path, notifier) {
        Ok(config) => WatchOutcome::Valid(Box::new(config)),
        Err(e) => WatchOutcome::Invalid(e.to_string()),
    }
}
