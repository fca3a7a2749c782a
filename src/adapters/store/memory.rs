use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::Utc;

use crate::domain::CycleReport;
use crate::ports::{DisplaySink, ReportStore};

/// In-memory ring buffer of recent cycle reports
pub struct MemoryReportStore {
    reports: RwLock<VecDeque<Arc<CycleReport>>>,
    max_size: usize,
}

impl MemoryReportStore {
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            reports: RwLock::new(VecDeque::with_capacity(max_size)),
            max_size,
        }
    }

    pub fn record(&self, report: CycleReport) {
        let mut reports = self.reports.write().unwrap_or_else(PoisonError::into_inner);

        if reports.len() >= self.max_size {
            reports.pop_front();
        }

        reports.push_back(Arc::new(report));
    }
}

impl DisplaySink for MemoryReportStore {
    fn show(&self, report: &CycleReport) {
        self.record(report.clone());
    }
}

impl ReportStore for MemoryReportStore {
    fn latest(&self) -> Option<Arc<CycleReport>> {
        self.reports
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .back()
            .cloned()
    }

    fn history(&self, window: Duration) -> Vec<Arc<CycleReport>> {
        let reports = self.reports.read().unwrap_or_else(PoisonError::into_inner);
        // Windows too large to represent cover everything
        let cutoff = chrono::Duration::from_std(window)
            .ok()
            .and_then(|window| Utc::now().checked_sub_signed(window));

        reports
            .iter()
            .filter(|r| cutoff.map_or(true, |cutoff| r.started_at >= cutoff))
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.reports.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Status, Target};

    fn report(cycle: u64, age_secs: i64) -> CycleReport {
        CycleReport {
            cycle,
            target: Target::default(),
            status: Status::reachable(cycle),
            significant: false,
            sound_enabled: true,
            started_at: Utc::now() - chrono::Duration::seconds(age_secs),
            elapsed_ms: 0,
        }
    }

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let store = MemoryReportStore::new(2);
        store.record(report(1, 0));
        store.record(report(2, 0));
        store.record(report(3, 0));

        assert_eq!(store.len(), 2);
        assert_eq!(store.latest().map(|r| r.cycle), Some(3));
    }

    #[test]
    fn test_history_window() {
        let store = MemoryReportStore::new(10);
        store.record(report(1, 600));
        store.record(report(2, 30));
        store.record(report(3, 1));

        let recent: Vec<u64> = store
            .history(Duration::from_secs(60))
            .iter()
            .map(|r| r.cycle)
            .collect();
        assert_eq!(recent, vec![2, 3]);
    }

    #[test]
    fn test_empty_store() {
        let store = MemoryReportStore::new(300);
        assert!(store.is_empty());
        assert!(store.latest().is_none());
    }
}
