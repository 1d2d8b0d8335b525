//! KeyValueStore backends

mod fs;
mod memory;

pub use fs::FsKvStore;
pub use memory::MemoryKvStore;
