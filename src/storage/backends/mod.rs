mod file;
mod memory;

pub use file::FileSlot;
pub use memory::MemorySlot;
