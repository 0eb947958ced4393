use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::runtime::Runtime;

use crate::model::TaskStore;

use super::cache;
use super::debounce::{Debounce, SaveDecision};
use super::journal;
use super::remote::{ApiError, RemoteStore};

/// Error type for bridge construction
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("could not start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Completion of an async remote push, drained on the event-loop tick
#[derive(Debug, Clone)]
pub enum SyncEvent {
    Pushed { last_sync: DateTime<Utc> },
    PushFailed { error: String },
}

/// Where the startup document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    Cache,
    Empty,
}

/// Result of the startup load
#[derive(Debug)]
pub struct LoadOutcome {
    pub store: TaskStore,
    pub source: LoadSource,
    /// Shown as an error toast when the load degraded
    pub warning: Option<String>,
}

/// Result of a blocking flush (CLI writes, session shutdown)
#[derive(Debug, Clone)]
pub enum FlushOutcome {
    Synced { last_sync: DateTime<Utc> },
    /// No remote configured; cache-only operation
    Offline,
    /// Cache was written but the remote push failed
    LocalOnly { error: String },
}

/// The persistence bridge: offline cache synchronously on every save,
/// remote store asynchronously with debouncing. Owns the tokio runtime so
/// the single-threaded UI loop never blocks on the network except at the
/// startup gate and the final flush.
pub struct Bridge {
    data_dir: PathBuf,
    remote: Option<RemoteStore>,
    runtime: Runtime,
    debounce: Debounce,
    events_tx: Sender<SyncEvent>,
    events_rx: Receiver<SyncEvent>,
}

impl Bridge {
    /// `api_url = None` disables the remote leg entirely (offline mode)
    pub fn new(data_dir: PathBuf, api_url: Option<&str>) -> Result<Self, BridgeError> {
        let remote = api_url.map(RemoteStore::new).transpose()?;
        let runtime = Runtime::new()?;
        let (events_tx, events_rx) = mpsc::channel();
        Ok(Bridge {
            data_dir,
            remote,
            runtime,
            debounce: Debounce::new(),
            events_tx,
            events_rx,
        })
    }

    pub fn offline(&self) -> bool {
        self.remote.is_none()
    }

    /// Startup gate: remote fetch, then offline cache, then empty store.
    /// Degradation surfaces as a warning, never a panic.
    pub fn load(&self) -> LoadOutcome {
        let remote_error = match &self.remote {
            Some(remote) => match self.runtime.block_on(remote.fetch()) {
                Ok(store) => {
                    return LoadOutcome {
                        store,
                        source: LoadSource::Remote,
                        warning: None,
                    };
                }
                Err(e) => {
                    journal::append(&self.data_dir, &format!("load fell back to cache: {e}"));
                    Some(e)
                }
            },
            None => None,
        };

        if let Some(store) = cache::read_cache(&self.data_dir) {
            let warning = remote_error
                .map(|e| format!("remote unavailable ({e}); loaded offline copy"));
            return LoadOutcome {
                store,
                source: LoadSource::Cache,
                warning,
            };
        }

        let warning = if remote_error.is_some() {
            Some("remote unavailable and no offline copy; starting empty".to_string())
        } else {
            None
        };
        LoadOutcome {
            store: TaskStore::default(),
            source: LoadSource::Empty,
            warning,
        }
    }

    /// Persist the store: cache first, always and synchronously, then the
    /// remote leg through the debounce machine. `immediate` bypasses the
    /// 1-second window.
    pub fn save(&mut self, store: &TaskStore, immediate: bool) {
        if let Err(e) = cache::write_cache(&self.data_dir, store) {
            journal::append(&self.data_dir, &format!("cache write failed: {e}"));
        }
        if self.remote.is_none() {
            return;
        }
        if self.debounce.record(Instant::now(), immediate) == SaveDecision::Dispatch {
            self.dispatch(store);
        }
    }

    /// Event-loop tick: fire any deferred save whose window elapsed or
    /// whose pending time crossed the 30-second flush bound.
    pub fn tick(&mut self, store: &TaskStore) {
        if self.remote.is_some() && self.debounce.poll(Instant::now()) {
            self.dispatch(store);
        }
    }

    /// Drain completed push results without blocking
    pub fn poll_events(&mut self) -> Vec<SyncEvent> {
        self.events_rx.try_iter().collect()
    }

    /// Fire-and-forget push of a full snapshot. The snapshot is serialized
    /// here, at dispatch time, so out-of-order completions stay harmless:
    /// every write is a complete document and last write wins.
    fn dispatch(&self, store: &TaskStore) {
        let Some(remote) = self.remote.clone() else {
            return;
        };
        let snapshot = match serde_json::to_value(store) {
            Ok(v) => v,
            Err(e) => {
                journal::append(&self.data_dir, &format!("snapshot serialization failed: {e}"));
                return;
            }
        };
        let tx = self.events_tx.clone();
        let data_dir = self.data_dir.clone();
        self.runtime.spawn(async move {
            let event = match remote.push(snapshot).await {
                Ok(receipt) => SyncEvent::Pushed {
                    last_sync: receipt.last_sync,
                },
                Err(e) => {
                    journal::append(&data_dir, &format!("push failed: {e}"));
                    SyncEvent::PushFailed {
                        error: e.to_string(),
                    }
                }
            };
            let _ = tx.send(event);
        });
    }

    /// Blocking flush: cache write plus a synchronous remote push. Used by
    /// CLI commands and session shutdown, where spawning and exiting would
    /// race the in-flight request. Updates `meta.last_sync` on success and
    /// rewrites the cache so the offline copy carries it too.
    pub fn flush_blocking(&mut self, store: &mut TaskStore) -> FlushOutcome {
        if let Err(e) = cache::write_cache(&self.data_dir, store) {
            journal::append(&self.data_dir, &format!("cache write failed: {e}"));
        }
        let Some(remote) = &self.remote else {
            return FlushOutcome::Offline;
        };
        // Any deferred save is covered by this push
        self.debounce.record(Instant::now(), true);

        let snapshot = match serde_json::to_value(&*store) {
            Ok(v) => v,
            Err(e) => {
                return FlushOutcome::LocalOnly {
                    error: format!("snapshot serialization failed: {e}"),
                };
            }
        };
        match self.runtime.block_on(remote.push(snapshot)) {
            Ok(receipt) => {
                store.mark_synced(receipt.last_sync);
                let _ = cache::write_cache(&self.data_dir, store);
                FlushOutcome::Synced {
                    last_sync: receipt.last_sync,
                }
            }
            Err(e) => {
                journal::append(&self.data_dir, &format!("push failed: {e}"));
                FlushOutcome::LocalOnly {
                    error: e.to_string(),
                }
            }
        }
    }
}
