use std::sync::Mutex;

use crate::errors::CoreError;

/// Logical key the journal lives under. Frontends backed by real
/// key-value storage (browser localStorage, Tauri store) use it
/// directly; the file store derives its default filename from it.
pub const STORAGE_KEY: &str = "smartalloc_snapshots";

/// One durable slot holding the serialized journal.
///
/// The journal is always written wholesale — there is no partial update,
/// so an implementation only needs read-all and replace-all.
pub trait SnapshotStore: Send + Sync {
    /// Read the stored payload. `None` when nothing was ever written.
    fn read(&self) -> Result<Option<String>, CoreError>;

    /// Replace the stored payload.
    fn write(&self, payload: &str) -> Result<(), CoreError>;
}

/// In-memory store for tests and hosts that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    payload: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-seeded payload (e.g. simulating prior history).
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Some(payload.into())),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, CoreError> {
        let guard = self
            .payload
            .lock()
            .map_err(|_| CoreError::Storage("Memory store poisoned".into()))?;
        Ok(guard.clone())
    }

    fn write(&self, payload: &str) -> Result<(), CoreError> {
        let mut guard = self
            .payload
            .lock()
            .map_err(|_| CoreError::Storage("Memory store poisoned".into()))?;
        *guard = Some(payload.to_string());
        Ok(())
    }
}

/// Single-file JSON store (native only). The file is created on first
/// write; a missing file reads as an empty journal.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/smartalloc_snapshots.json`.
    pub fn in_dir(dir: impl AsRef<std::path::Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SnapshotStore for FileStore {
    fn read(&self) -> Result<Option<String>, CoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, payload: &str) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, payload)?;
        Ok(())
    }
}
