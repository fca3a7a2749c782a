use super::Status;

/// Last observed status, `None` until the first probe completes
pub type MonitorState = Option<Status>;

/// Result of feeding one status into the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Reachability category flipped since the previous observation
    pub changed: bool,
    pub state: Status,
}

/// Tracks the last status and detects reachable <-> unreachable flips
#[derive(Debug, Default)]
pub struct StateTracker {
    last: MonitorState,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `status` and report whether it crossed a category boundary.
    ///
    /// The first observation is never significant.
    pub fn observe(&mut self, status: Status) -> Observation {
        let changed = self
            .last
            .map(|previous| !previous.same_category(&status))
            .unwrap_or(false);

        self.last = Some(status);

        Observation {
            changed,
            state: status,
        }
    }
}
