use crate::error::Result;

/// Synchronous key/value text storage scoped to one device profile, the
/// same shape as browser local storage. No expiry, no quota visible here.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
