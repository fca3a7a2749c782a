pub mod config_store;
pub mod display_sink;
pub mod notifier;
pub mod probe_transport;
pub mod report_store;

pub use config_store::{ConfigStore, ConfigStoreError};
pub use display_sink::DisplaySink;
pub use notifier::{Notifier, NotifyError};
pub use probe_transport::ProbeTransport;
pub use report_store::ReportStore;
