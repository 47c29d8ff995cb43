//! Persistence interface consumed by the session layer

use crate::Result;

/// Durable string key-value storage.
///
/// Implementations must make `put_all` and `delete_all` atomic: a reader
/// never observes only some of the keys of one call.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn put(&self, key: &str, value: &str) -> Result<()>;

    fn delete(&self, key: &str) -> Result<()>;

    /// Write several keys as one unit.
    fn put_all(&self, entries: &[(&str, &str)]) -> Result<()>;

    /// Remove several keys as one unit. Missing keys are not an error.
    fn delete_all(&self, keys: &[&str]) -> Result<()>;
}
