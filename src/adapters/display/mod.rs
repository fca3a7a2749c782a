mod log;

pub use log::LogDisplay;
