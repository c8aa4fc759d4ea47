//! Store persistence.
//!
//! The store mirrors `{cart, user, isAuthenticated}` to a single persisted
//! record after every dispatch, and hydrates from it once on startup. The
//! category cache is deliberately not persisted.
//!
//! Failure isolation: a persister error never reaches the dispatcher; the
//! store logs and moves on. On load, malformed data counts as "nothing
//! persisted yet".

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use nexus_shop_core::{CartItem, User};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::StoreState;

/// Errors a persistence sink can produce.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The persisted slice of the store.
///
/// Fields are optional so a partial or older blob still hydrates; absent
/// fields leave the current state untouched (shallow merge).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub cart: Option<Vec<CartItem>>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default, rename = "isAuthenticated")]
    pub is_authenticated: Option<bool>,
}

impl PersistedState {
    /// The persisted projection of a full store state.
    #[must_use]
    pub fn snapshot(state: &StoreState) -> Self {
        Self {
            cart: Some(state.cart.clone()),
            user: state.user.clone(),
            is_authenticated: Some(state.is_authenticated),
        }
    }
}

/// A sink the store mirrors its state to on every change.
pub trait StatePersister {
    /// Load the previously persisted state.
    ///
    /// `Ok(None)` means nothing usable is persisted (missing or malformed
    /// data both land here).
    ///
    /// # Errors
    ///
    /// Returns an error only for failures worth surfacing to the caller,
    /// e.g. a file that exists but cannot be read.
    fn load(&self) -> Result<Option<PersistedState>, PersistError>;

    /// Persist the state, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written.
    fn save(&self, state: &PersistedState) -> Result<(), PersistError>;
}

/// Persists the store as a single JSON file at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFilePersister {
    path: PathBuf,
}

impl JsonFilePersister {
    /// Create a persister writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path the store is persisted at.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatePersister for JsonFilePersister {
    fn load(&self) -> Result<Option<PersistedState>, PersistError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                // Malformed persisted data is discarded, not an error
                debug!(error = %e, path = %self.path.display(), "discarding malformed store file");
                Ok(None)
            }
        }
    }

    fn save(&self, state: &PersistedState) -> Result<(), PersistError> {
        fs::write(&self.path, serde_json::to_string(state)?)?;
        Ok(())
    }
}

/// Persists the auth bearer token under its own file, separate from the
/// store blob.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a token store writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load(&self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(token) => {
                let token = token.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be written.
    pub fn save(&self, token: &str) -> Result<(), PersistError> {
        fs::write(&self.path, token)?;
        Ok(())
    }

    /// Remove the persisted token. Missing file is fine.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), PersistError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::{Store, StoreAction};
    use chrono::Utc;
    use nexus_shop_core::{Product, ProductId};
    use rust_decimal::Decimal;

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            description: String::new(),
            price: Decimal::from(10),
            category_id: None,
            stock: 3,
            images: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_and_hydrate_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = Store::with_persister(Box::new(JsonFilePersister::new(&path)));
        store.dispatch(StoreAction::AddToCart(product(1)));
        store.dispatch(StoreAction::AddToCart(product(1)));

        let reloaded = Store::with_persister(Box::new(JsonFilePersister::new(&path)));
        assert_eq!(reloaded.state().cart.len(), 1);
        assert_eq!(reloaded.state().cart[0].quantity, 2);
    }

    #[test]
    fn test_persisted_blob_uses_wire_key_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = Store::with_persister(Box::new(JsonFilePersister::new(&path)));
        store.dispatch(StoreAction::ClearCart);

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("cart").is_some());
        assert!(raw.get("isAuthenticated").is_some());
    }

    #[test]
    fn test_malformed_file_hydrates_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not valid json").unwrap();

        let persister = JsonFilePersister::new(&path);
        assert_eq!(persister.load().unwrap(), None);

        let store = Store::with_persister(Box::new(persister));
        assert!(store.state().cart.is_empty());
        assert!(!store.state().is_authenticated);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let persister = JsonFilePersister::new(dir.path().join("absent.json"));
        assert_eq!(persister.load().unwrap(), None);
    }

    #[test]
    fn test_persistence_failure_does_not_abort_dispatch() {
        // Point the persister at a directory path so saves fail
        let dir = tempfile::tempdir().unwrap();
        let mut store =
            Store::with_persister(Box::new(JsonFilePersister::new(dir.path())));

        store.dispatch(StoreAction::AddToCart(product(1)));
        assert_eq!(store.state().cart.len(), 1);
    }

    #[test]
    fn test_token_store_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let tokens = TokenStore::new(dir.path().join("token"));

        assert_eq!(tokens.load().unwrap(), None);
        tokens.save("jwt-abc").unwrap();
        assert_eq!(tokens.load().unwrap().as_deref(), Some("jwt-abc"));
        tokens.clear().unwrap();
        assert_eq!(tokens.load().unwrap(), None);
        tokens.clear().unwrap();
    }
}
