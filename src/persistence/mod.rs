//! Key-value storage for small JSON blobs (settings)
//!
//! Backends:
//! - `LocalStore`: browser LocalStorage (wasm only)
//! - `FileStore`: one `<key>.json` file per key in a directory (native only)
//! - `MemoryStore`: in-process map, used by tests and as a fallback

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
mod local;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// Storage errors
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored blob could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend cannot be reached (no window, storage disabled, ...)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// String values under string keys
pub trait KeyValueStore {
    /// `Ok(None)` when nothing is stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Platform default backend
///
/// Falls back to an in-memory store (settings then last for the session
/// only) when the platform backend cannot be opened.
pub fn default_store() -> Box<dyn KeyValueStore> {
    #[cfg(target_arch = "wasm32")]
    let opened = LocalStore::open().map(|s| Box::new(s) as Box<dyn KeyValueStore>);

    #[cfg(not(target_arch = "wasm32"))]
    let opened = FileStore::open(FileStore::default_dir())
        .map(|s| Box::new(s) as Box<dyn KeyValueStore>);

    match opened {
        Ok(store) => store,
        Err(e) => {
            log::warn!("Settings storage unavailable, using memory: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}
