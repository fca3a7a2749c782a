use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Process configuration, read from the environment.
///
/// User-editable monitor settings (target, interval, sound) live in the
/// settings file at `settings_path`, not here.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub http_enabled: bool,
    pub settings_path: PathBuf,
    pub probe_timeout_secs: u64,
    pub history_size: usize,
    pub webhook_url: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PINGMON_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            http_enabled: env::var("PINGMON_HTTP_ENABLED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
            settings_path: env::var("PINGMON_SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_settings_path()),
            probe_timeout_secs: env::var("PINGMON_PROBE_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
            history_size: env::var("PINGMON_HISTORY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300),
            webhook_url: env::var("PINGMON_WEBHOOK_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            log_level: env::var("PINGMON_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// `<config dir>/pingmon/settings.json`, or `./settings.json` without a config dir
fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("pingmon").join("settings.json"))
        .unwrap_or_else(|| PathBuf::from("settings.json"))
}
