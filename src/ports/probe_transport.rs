use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{ProbeOutcome, Target};

/// Port for running a single reachability probe
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    /// Probe `target` once, waiting at most `timeout`.
    ///
    /// Every failure is reported as `ProbeOutcome::Failure`; this never errors.
    async fn execute(&self, target: &Target, timeout: Duration) -> ProbeOutcome;
}
