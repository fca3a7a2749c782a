use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::domain::{CycleReport, Status};
use crate::ports::{Notifier, NotifyError};

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

/// JSON body posted on each transition
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    target: &'a str,
    text: String,
    status: &'a Status,
    reachable: bool,
    round_trip_ms: Option<u64>,
    timestamp: String,
}

impl<'a> From<&'a CycleReport> for WebhookPayload<'a> {
    fn from(report: &'a CycleReport) -> Self {
        Self {
            target: report.target.as_str(),
            text: report.text(),
            status: &report.status,
            reachable: report.status.is_reachable(),
            round_trip_ms: report.status.round_trip_ms(),
            timestamp: report.started_at.to_rfc3339(),
        }
    }
}

/// Notifier posting reachability transitions to an HTTP endpoint
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(WEBHOOK_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn notify(&self, report: &CycleReport) -> Result<(), NotifyError> {
        if !report.significant {
            return Ok(());
        }

        self.client
            .post(&self.url)
            .json(&WebhookPayload::from(report))
            .send()
            .await?
            .error_for_status()?;

        info!(host = %report.target, status = %report.status, "Webhook delivered");
        Ok(())
    }
}
