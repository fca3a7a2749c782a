use std::fmt;

use serde::{Deserialize, Serialize};

/// Host probed when nothing else is configured
pub const DEFAULT_TARGET: &str = "google.com";

/// Host name or IP address to probe (opaque to the core)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    pub fn new(target: impl Into<String>) -> Self {
        Self(target.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Default for Target {
    fn default() -> Self {
        Self(DEFAULT_TARGET.to_string())
    }
}

impl From<String> for Target {
    fn from(target: String) -> Self {
        Self(target)
    }
}

impl From<&str> for Target {
    fn from(target: &str) -> Self {
        Self(target.to_string())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
