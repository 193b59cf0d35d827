pub mod json;
pub mod memory;
pub mod records;

pub use json::JsonFileStore;
pub use memory::{MemoryStore, StoreSnapshot};
pub use records::{create_record, delete_record, search_records, update_record};
