//! NewsDesk Storage Layer
//!
//! Durable key-value persistence for client state that must survive
//! process restarts (the signed-in user and its bearer token).
//! Multi-key writes are transactional: either every key lands or none does.

mod database;
mod error;
mod memory;
mod migrations;
mod store;

pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use store::KeyValueStore;

pub type Result<T> = std::result::Result<T, StorageError>;
