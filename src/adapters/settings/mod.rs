mod json;
#[cfg(test)]
mod memory;

pub use json::JsonConfigStore;
#[cfg(test)]
pub use memory::MemoryConfigStore;
