pub mod display;
pub mod notify;
pub mod ping;
pub mod settings;
pub mod store;

pub use display::LogDisplay;
pub use notify::{SoundNotifier, WebhookNotifier};
pub use ping::SystemPing;
pub use settings::JsonConfigStore;
#[cfg(test)]
pub use settings::MemoryConfigStore;
pub use store::MemoryReportStore;
