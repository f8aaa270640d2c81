mod bytes;
pub mod layout;
mod process;
mod reader;

#[cfg(test)]
pub mod mock;

pub use bytes::decode_windows_1251;
pub use layout::{MemoryLayout, load_layout, save_layout};
pub use process::{ProcessHandle, find_process_id};
pub use reader::{MemoryReader, ReadMemory};

#[cfg(test)]
pub use mock::{MockMemoryBuilder, MockMemoryReader};
