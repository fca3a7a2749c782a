mod memory;

pub use memory::MemoryReportStore;
