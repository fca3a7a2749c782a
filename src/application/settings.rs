use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{info, warn};

use crate::domain::{MonitorSettings, SettingsError, SettingsPatch};
use crate::ports::ConfigStore;

/// Owns the current settings and publishes every change to subscribers.
///
/// Each published value is a complete snapshot, so readers never observe a
/// partially applied edit.
pub struct SettingsService {
    store: Arc<dyn ConfigStore>,
    tx: watch::Sender<MonitorSettings>,
    update_lock: Mutex<()>,
}

impl SettingsService {
    /// Load settings from the store, falling back to defaults
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        let initial = store.load_or_default();
        info!(
            host = %initial.target,
            interval_seconds = initial.interval_seconds,
            sound_enabled = initial.sound_enabled,
            "Settings loaded"
        );

        let (tx, _rx) = watch::channel(initial);
        Self {
            store,
            tx,
            update_lock: Mutex::new(()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<MonitorSettings> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> MonitorSettings {
        self.tx.borrow().clone()
    }

    /// Apply a user edit, persist it and publish it.
    ///
    /// A failed write is logged and the edit still takes effect. The store is
    /// written on the blocking pool.
    pub async fn update(&self, patch: &SettingsPatch) -> Result<MonitorSettings, SettingsError> {
        let _guard = self.update_lock.lock().await;

        let current = self.current();
        let next = patch.apply(&current)?;
        if next == current {
            return Ok(next);
        }

        let store = Arc::clone(&self.store);
        let snapshot = next.clone();
        match tokio::task::spawn_blocking(move || store.save(&snapshot)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "Failed to persist settings"),
            Err(e) => warn!(error = %e, "Settings writer task failed"),
        }

        info!(
            host = %next.target,
            interval_seconds = next.interval_seconds,
            sound_enabled = next.sound_enabled,
            "Settings updated"
        );
        self.tx.send_replace(next.clone());
        Ok(next)
    }
}
