//! SQLite adapters.

pub mod connection;
pub mod memory_store;

pub use connection::{create_pool, create_test_pool, ConnectionError};
pub use memory_store::SqliteMemoryStore;
