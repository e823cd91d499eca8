//! Local snapshot persistence.
//!
//! The guest cart and the session credential are the only state persisted
//! across reloads, stored together as a single namespaced JSON snapshot.
//! Everything else (loading flags, errors, the server-derived cart after
//! login) is session-transient and rebuilt from the backend.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use shopfront_core::{CartLineItem, User};
use thiserror::Error;
use tracing::warn;

/// Current snapshot schema version.
const SNAPSHOT_VERSION: u32 = 1;

/// Errors raised by snapshot persistence.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the snapshot file failed.
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization failed.
    #[error("Snapshot encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persisted credential: the bearer token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAuth {
    pub token: String,
    pub user: User,
}

/// The single persisted snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PersistedState {
    #[serde(default = "snapshot_version")]
    pub version: u32,
    /// Credential of the last authenticated session, if any.
    #[serde(default)]
    pub auth: Option<PersistedAuth>,
    /// Guest cart line items; empty once a session cart is authoritative.
    #[serde(default)]
    pub cart_items: Vec<CartLineItem>,
}

const fn snapshot_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Store for the persisted snapshot.
pub trait StateStore: Send + Sync {
    /// Load the snapshot. `Ok(None)` when nothing was persisted yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying storage cannot be read.
    fn load(&self) -> Result<Option<PersistedState>, StorageError>;

    /// Persist the snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying storage cannot be written.
    fn save(&self, state: &PersistedState) -> Result<(), StorageError>;

    /// Remove the snapshot entirely.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying storage cannot be modified.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Load-or-default, mutate, save.
///
/// # Errors
///
/// Propagates load/save failures from the store.
pub fn update<F>(store: &dyn StateStore, mutate: F) -> Result<(), StorageError>
where
    F: FnOnce(&mut PersistedState),
{
    let mut state = store.load()?.unwrap_or_default();
    mutate(&mut state);
    store.save(&state)
}

// =============================================================================
// FileStore
// =============================================================================

/// Snapshot store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at the given path. Parent directories are created
    /// lazily on first save.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StateStore for FileStore {
    fn load(&self) -> Result<Option<PersistedState>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // A corrupt snapshot is discarded, never a hard failure: the worst
        // case is losing a guest cart, and failing here would brick startup.
        match serde_json::from_str(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding corrupt snapshot");
                Ok(None)
            }
        }
    }

    fn save(&self, state: &PersistedState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory snapshot store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<PersistedState>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<PersistedState>, StorageError> {
        Ok(self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, state: &PersistedState) -> Result<(), StorageError> {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shopfront_core::ProductId;

    fn sample_state() -> PersistedState {
        PersistedState {
            version: SNAPSHOT_VERSION,
            auth: None,
            cart_items: vec![CartLineItem {
                product_id: ProductId::new(1),
                product_name: "Widget".to_string(),
                product_price: Decimal::new(999, 2),
                product_image_url: None,
                quantity: 2,
                subtotal: Decimal::new(1998, 2),
            }],
        }
    }

    fn temp_store() -> FileStore {
        let path = std::env::temp_dir()
            .join("shopfront-tests")
            .join(format!("state-{}.json", uuid::Uuid::new_v4()));
        FileStore::new(path)
    }

    #[test]
    fn file_store_round_trips() {
        let store = temp_store();
        assert!(store.load().unwrap().is_none());

        let state = sample_state();
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), Some(state));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_snapshot_is_discarded() {
        let store = temp_store();
        if let Some(parent) = store.path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&store.path, "{not json").unwrap();

        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn update_creates_missing_state() {
        let store = MemoryStore::new();
        update(&store, |state| {
            state.cart_items = sample_state().cart_items;
        })
        .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.cart_items.len(), 1);
        assert!(loaded.auth.is_none());
    }

    #[test]
    fn clearing_twice_is_benign() {
        let store = temp_store();
        store.clear().unwrap();
        store.clear().unwrap();
    }
}
