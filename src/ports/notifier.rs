use async_trait::async_trait;
use thiserror::Error;

use crate::domain::CycleReport;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    #[error("Webhook delivery failed: {0}")]
    Webhook(#[from] reqwest::Error),
}

/// Port for alerting on probe cycles.
///
/// Called once per completed cycle; implementations decide whether the
/// report warrants an alert (usually only when `report.significant`).
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    async fn notify(&self, report: &CycleReport) -> Result<(), NotifyError>;
}
