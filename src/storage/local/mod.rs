pub mod kv;
pub mod session_store;

pub use kv::{JsonFileStore, KeyValueStore, MemoryKeyValueStore};
pub use session_store::SessionStore;
