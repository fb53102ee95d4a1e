pub mod disk;
pub mod memory;

pub use disk::{DiskStore, DiskStorage};
pub use memory::MemoryStorage;
