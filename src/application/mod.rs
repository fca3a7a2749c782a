pub mod scheduler;
pub mod settings;

pub use scheduler::{MonitorError, MonitorHandle, MonitorScheduler, SchedulerPhase};
pub use settings::SettingsService;
