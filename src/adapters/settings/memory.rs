use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::MonitorSettings;
use crate::ports::{ConfigStore, ConfigStoreError};

/// Config store that keeps settings in memory only
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    settings: Mutex<Option<MonitorSettings>>,
    saves: AtomicUsize,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: MonitorSettings) -> Self {
        Self {
            settings: Mutex::new(Some(settings)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful `save` calls
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<MonitorSettings, ConfigStoreError> {
        let settings = self.settings.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(settings.clone().unwrap_or_default())
    }

    fn save(&self, settings: &MonitorSettings) -> Result<(), ConfigStoreError> {
        *self.settings.lock().unwrap_or_else(PoisonError::into_inner) = Some(settings.clone());
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
