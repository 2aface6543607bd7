pub mod file;
pub mod food_log;
pub mod memory;
pub mod traits;
#[cfg(test)]
pub(crate) mod test_utils;

pub use file::FileKeyValueStore;
pub use food_log::{storage_key, FoodLogStore};
pub use memory::MemoryKeyValueStore;
pub use traits::KeyValueStore;
