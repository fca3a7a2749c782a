use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::MonitorSettings;
use crate::ports::{ConfigStore, ConfigStoreError};

/// Settings persisted as a small JSON document.
///
/// Keys the monitor does not use (`panelPosition`, `panelOrder`, ...) are
/// left untouched when the document is rewritten.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Existing document as a JSON object, or an empty one if absent or unreadable
    fn read_document(&self) -> Map<String, Value> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .and_then(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default()
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> Result<MonitorSettings, ConfigStoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No settings file, using defaults");
                return Ok(MonitorSettings::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings: MonitorSettings = serde_json::from_str(&content)?;
        Ok(settings.normalized())
    }

    fn save(&self, settings: &MonitorSettings) -> Result<(), ConfigStoreError> {
        let mut document = self.read_document();
        if let Value::Object(fields) = serde_json::to_value(settings)? {
            document.extend(fields);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write to a sibling file first so a crash never leaves a truncated document
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(&Value::Object(document))?)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}
