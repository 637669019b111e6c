//! Durable key-value blob storage.
//!
//! The cart manager persists each state slice as an opaque blob under a
//! fixed key. Any backend implementing [`KvStore`] can be plugged in:
//!
//! - [`FileStore`] - one file per key under a data directory (production)
//! - [`MemoryStore`] - process-local map (tests, ephemeral runs)

mod file;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors returned by a [`KvStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key contains characters the backend cannot store.
    #[error("invalid key {0:?}")]
    InvalidKey(String),

    /// Underlying I/O failed.
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend is unavailable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A durable store of opaque blobs keyed by string.
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    /// Read the blob stored under `key`, or `None` if nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the blob stored under `key`.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}

/// Check that a key is safe to use as a file name.
///
/// Keys must be non-empty and contain only ASCII letters, digits, `-` and `_`.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("cart-state").is_ok());
        assert!(validate_key("favorites_state2").is_ok());

        assert!(matches!(validate_key(""), Err(StoreError::InvalidKey(_))));
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("with space").is_err());
        assert!(validate_key("@quickbite_cart").is_err());
    }
}
