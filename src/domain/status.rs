use std::fmt;

use serde::{Deserialize, Serialize};

/// Reachability classification of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Status {
    Reachable { round_trip_ms: u64 },
    Unreachable,
}

impl Status {
    pub fn reachable(round_trip_ms: u64) -> Self {
        Self::Reachable { round_trip_ms }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable { .. })
    }

    pub fn round_trip_ms(&self) -> Option<u64> {
        match self {
            Self::Reachable { round_trip_ms } => Some(*round_trip_ms),
            Self::Unreachable => None,
        }
    }

    /// Latency is ignored; only reachable vs unreachable counts.
    pub fn same_category(&self, other: &Status) -> bool {
        self.is_reachable() == other.is_reachable()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reachable { round_trip_ms } => write!(f, "{} ms", round_trip_ms),
            Self::Unreachable => f.write_str("No response"),
        }
    }
}
