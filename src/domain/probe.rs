use std::sync::LazyLock;

use regex::Regex;

use super::Status;

static ROUND_TRIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"time=\s*([0-9]+(?:\.[0-9]+)?)").expect("round-trip pattern is valid")
});

/// Raw result of one probe, produced fresh every cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Probe process exited cleanly; `output` is its stdout
    Reply { output: String },
    /// Spawn error, non-zero exit or timeout
    Failure { reason: String },
}

impl ProbeOutcome {
    pub fn reply(output: impl Into<String>) -> Self {
        Self::Reply {
            output: output.into(),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Classify the outcome. Failures are always unreachable.
    pub fn classify(&self) -> Status {
        match self {
            Self::Reply { output } => parse(output),
            Self::Failure { .. } => Status::Unreachable,
        }
    }
}

/// Extract the round-trip time from raw ping output.
///
/// Looks for the first `time=<number>` marker and rounds it to the nearest
/// whole millisecond. Output without a marker (lost packet, unexpected
/// format) is `Unreachable`.
pub fn parse(raw: &str) -> Status {
    ROUND_TRIP
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|ms| ms.is_finite())
        .map(|ms| Status::reachable(ms.round() as u64))
        .unwrap_or(Status::Unreachable)
}
