use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Status, Target};

/// Everything the display and notification sinks learn about one cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub cycle: u64,
    pub target: Target,
    pub status: Status,
    /// Reachability category flipped on this cycle
    pub significant: bool,
    pub sound_enabled: bool,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl CycleReport {
    /// Human-readable rendering for display sinks
    pub fn text(&self) -> String {
        self.status.to_string()
    }
}
