pub mod probe;
pub mod report;
pub mod settings;
pub mod state;
pub mod status;
pub mod target;

pub use probe::ProbeOutcome;
pub use report::CycleReport;
pub use settings::{MonitorSettings, SettingsError, SettingsPatch};
pub use state::StateTracker;
pub use status::Status;
pub use target::Target;
