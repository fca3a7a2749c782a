use thiserror::Error;
use tracing::warn;

use crate::domain::MonitorSettings;

#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Port for loading and persisting user settings
pub trait ConfigStore: Send + Sync {
    /// Load the stored settings; a store with nothing saved yields defaults
    fn load(&self) -> Result<MonitorSettings, ConfigStoreError>;

    /// Persist the settings
    fn save(&self, settings: &MonitorSettings) -> Result<(), ConfigStoreError>;

    /// Load the settings, falling back to defaults on any error
    fn load_or_default(&self) -> MonitorSettings {
        match self.load() {
            Ok(settings) => settings.normalized(),
            Err(e) => {
                warn!(error = %e, "Failed to load settings, using defaults");
                MonitorSettings::default()
            }
        }
    }
}
