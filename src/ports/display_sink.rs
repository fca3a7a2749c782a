use crate::domain::CycleReport;

/// Port for showing the status of each completed cycle
pub trait DisplaySink: Send + Sync {
    fn show(&self, report: &CycleReport);
}
