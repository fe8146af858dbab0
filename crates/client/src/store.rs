//! Durable cart storage.
//!
//! One sled key holds the entire cart as a JSON array of lines. Missing or
//! corrupt data degrades to an empty cart on load.

use std::path::Path;

use sled::Db;

use shoplite_core::cart::{Cart, CartLine};

/// Key under which the serialized cart lives.
const CART_KEY: &[u8] = b"cart";

/// Errors from the cart store.
///
/// Only writes surface errors; reads degrade to an empty cart.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cart storage error: {0}")]
    Storage(#[from] sled::Error),
    #[error("cart serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable key/value store holding the session's cart.
pub struct CartStore {
    db: Db,
}

impl CartStore {
    /// Open (or create) the cart store at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the underlying tree cannot be
    /// opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Load the persisted cart.
    ///
    /// A missing key or malformed payload yields an empty cart, never an
    /// error; corruption is logged and forgotten.
    #[must_use]
    pub fn load(&self) -> Cart {
        let bytes = match self.db.get(CART_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Cart::new(),
            Err(e) => {
                tracing::warn!("failed to read persisted cart, starting empty: {e}");
                return Cart::new();
            }
        };

        match serde_json::from_slice::<Vec<CartLine>>(&bytes) {
            Ok(lines) => Cart::from_lines(lines),
            Err(e) => {
                tracing::warn!("persisted cart is malformed, starting empty: {e}");
                Cart::new()
            }
        }
    }

    /// Persist the cart, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if serialization or the durable write fails.
    /// The caller's in-memory cart is unaffected either way.
    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(cart.lines())?;
        self.db.insert(CART_KEY, bytes)?;
        self.db.flush()?;
        Ok(())
    }

    /// Drop the persisted cart entirely.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the removal cannot be made durable.
    pub fn delete(&self) -> Result<(), StoreError> {
        self.db.remove(CART_KEY)?;
        self.db.flush()?;
        Ok(())
    }
}
