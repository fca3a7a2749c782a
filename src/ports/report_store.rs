use std::sync::Arc;
use std::time::Duration;

use crate::domain::CycleReport;

/// Port for retrieving recent cycle reports
pub trait ReportStore: Send + Sync {
    /// Most recent report, if any cycle has completed
    fn latest(&self) -> Option<Arc<CycleReport>>;

    /// All reports started within the given window
    fn history(&self, window: Duration) -> Vec<Arc<CycleReport>>;

    /// Number of stored reports
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
