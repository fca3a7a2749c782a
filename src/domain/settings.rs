use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Target;

pub const DEFAULT_INTERVAL_SECONDS: u64 = 1;

/// One day
pub const MAX_INTERVAL_SECONDS: u64 = 24 * 60 * 60;

/// User-editable monitor settings.
///
/// Serialized with the key names of the persisted settings document; missing
/// keys fall back to defaults and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonitorSettings {
    #[serde(rename = "domainToPing", alias = "target")]
    pub target: Target,
    pub interval_seconds: u64,
    pub sound_enabled: bool,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            target: Target::default(),
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            sound_enabled: true,
        }
    }
}

impl MonitorSettings {
    pub fn with_target(mut self, target: impl Into<Target>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_interval_seconds(mut self, interval_seconds: u64) -> Self {
        self.interval_seconds = interval_seconds;
        self
    }

    pub fn with_sound_enabled(mut self, sound_enabled: bool) -> Self {
        self.sound_enabled = sound_enabled;
        self
    }

    /// Poll interval, clamped to between one second and one day.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds.clamp(1, MAX_INTERVAL_SECONDS))
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.target.is_blank() {
            return Err(SettingsError::EmptyTarget);
        }
        if self.interval_seconds == 0 {
            return Err(SettingsError::ZeroInterval);
        }
        if self.interval_seconds > MAX_INTERVAL_SECONDS {
            return Err(SettingsError::IntervalTooLong);
        }
        Ok(())
    }

    /// Replace invalid fields with their defaults.
    pub fn normalized(mut self) -> Self {
        if self.target.is_blank() {
            self.target = Target::default();
        }
        if self.interval_seconds == 0 {
            self.interval_seconds = DEFAULT_INTERVAL_SECONDS;
        }
        self.interval_seconds = self.interval_seconds.min(MAX_INTERVAL_SECONDS);
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("target must not be empty")]
    EmptyTarget,

    #[error("interval must be at least one second")]
    ZeroInterval,

    #[error("interval must not exceed one day")]
    IntervalTooLong,
}

/// Partial update coming from the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(alias = "domainToPing")]
    pub target: Option<Target>,
    pub interval_seconds: Option<u64>,
    pub sound_enabled: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.target.is_none() && self.interval_seconds.is_none() && self.sound_enabled.is_none()
    }

    /// Apply the patch on top of `current`, rejecting invalid results.
    pub fn apply(&self, current: &MonitorSettings) -> Result<MonitorSettings, SettingsError> {
        let mut next = current.clone();
        if let Some(target) = &self.target {
            next.target = Target::new(target.as_str().trim());
        }
        if let Some(interval_seconds) = self.interval_seconds {
            next.interval_seconds = interval_seconds;
        }
        if let Some(sound_enabled) = self.sound_enabled {
            next.sound_enabled = sound_enabled;
        }
        next.validate()?;
        Ok(next)
    }
}
