//! Storage layer: the remote relational store behind traits, an in-memory
//! stand-in for it, and the browser-local key-value state.

pub mod local;
pub mod memory;
pub mod traits;

pub use local::kv::{JsonFileStore, KeyValueStore, MemoryKeyValueStore};
pub use local::session_store::SessionStore;
pub use memory::MemoryStore;
pub use traits::{AuthStore, CompanyStore, CustomerStore, ProductStore, SaleStore, UserUpsert};
