use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::domain::CycleReport;
use crate::ports::DisplaySink;

/// Display sink writing the rendered status to the log.
///
/// Repeats of the same text are logged at debug level only.
#[derive(Debug, Default)]
pub struct LogDisplay {
    last_text: Mutex<Option<String>>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySink for LogDisplay {
    fn show(&self, report: &CycleReport) {
        let text = report.text();
        let mut last_text = self.last_text.lock().unwrap_or_else(PoisonError::into_inner);

        if report.significant || last_text.as_deref() != Some(text.as_str()) {
            info!(host = %report.target, cycle = report.cycle, "{}", text);
        } else {
            debug!(host = %report.target, cycle = report.cycle, "{}", text);
        }

        *last_text = Some(text);
    }
}
