//! Write-through cart session.
//!
//! `CartSession` owns the in-memory cart and its durable store. Every
//! mutating operation applies the pure engine transformation first, then
//! persists the result. A failed persist never rolls back the in-memory
//! mutation - durability is the only thing lost, and the error is returned
//! so the caller can retry or warn the buyer.

use rust_decimal::Decimal;

use shoplite_core::cart::{Cart, CartLine};
use shoplite_core::product::Product;
use shoplite_core::types::ProductId;

use crate::store::{CartStore, StoreError};

/// The active browsing session's cart: engine plus write-through storage.
///
/// Single-writer by construction: the session owns the cart value, and each
/// mutation completes (including the persist) before the next is applied.
pub struct CartSession {
    cart: Cart,
    store: CartStore,
}

impl CartSession {
    /// Restore the session cart from the store (empty if nothing or
    /// garbage was persisted).
    #[must_use]
    pub fn restore(store: CartStore) -> Self {
        let cart = store.load();
        Self { cart, store }
    }

    /// Add one unit of `product` and persist.
    ///
    /// # Errors
    ///
    /// Returns the persist failure; the in-memory cart already reflects the
    /// add.
    pub fn add(&mut self, product: Product) -> Result<(), StoreError> {
        self.cart.add(product);
        self.persist()
    }

    /// Remove the line for `id` (idempotent) and persist.
    ///
    /// # Errors
    ///
    /// Returns the persist failure; the in-memory cart already reflects the
    /// removal.
    pub fn remove(&mut self, id: &ProductId) -> Result<(), StoreError> {
        self.cart.remove(id);
        self.persist()
    }

    /// Adjust quantity by `delta` (floor at zero deletes) and persist.
    ///
    /// # Errors
    ///
    /// Returns the persist failure; the in-memory cart already reflects the
    /// change.
    pub fn change_quantity(&mut self, id: &ProductId, delta: i64) -> Result<(), StoreError> {
        self.cart.change_quantity(id, delta);
        self.persist()
    }

    /// Empty the cart and drop the persisted copy.
    ///
    /// # Errors
    ///
    /// Returns the store failure; the in-memory cart is already empty.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.cart.clear();
        self.store.delete().map_err(|e| {
            tracing::warn!("dropping the persisted cart failed (in-memory cart is empty): {e}");
            e
        })
    }

    /// Current cart value.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Display total from the held snapshots (advisory; checkout re-prices).
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Badge count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.cart.count()
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(&self.cart).map_err(|e| {
            tracing::warn!("cart persist failed (in-memory cart unaffected): {e}");
            e
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn product(id: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: dec(price),
            image: format!("/img/{id}.jpg"),
            category: "general".to_owned(),
            description: String::new(),
            rating: 4.0,
            review_count: 3,
            badge: None,
        }
    }

    fn session_in(dir: &tempfile::TempDir) -> CartSession {
        CartSession::restore(CartStore::open(dir.path()).unwrap())
    }

    #[test]
    fn test_every_mutation_is_written_through() {
        let dir = tempfile::tempdir().unwrap();

        // sled holds an exclusive lock per path; drop the writing session
        // before opening another store over the same tree.
        let written = {
            let mut session = session_in(&dir);
            session.add(product("p1", "10.00")).unwrap();
            session.add(product("p2", "5.50")).unwrap();
            session.change_quantity(&ProductId::new("p1"), 1).unwrap();
            session.cart().clone()
        };

        // A second session over the same store sees the exact same cart.
        let other = session_in(&dir);
        assert_eq!(other.cart(), &written);
        assert_eq!(other.total(), dec("25.50"));
        assert_eq!(other.count(), 3);
    }

    #[test]
    fn test_clear_persists_the_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut session = session_in(&dir);
            session.add(product("p1", "10.00")).unwrap();
            session.clear().unwrap();
        }

        assert!(session_in(&dir).cart().is_empty());
    }

    #[test]
    fn test_restore_after_reload_matches_before() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut session = session_in(&dir);
            session.add(product("p1", "19.99")).unwrap();
            session.add(product("p1", "19.99")).unwrap();
        }

        let session = session_in(&dir);
        assert_eq!(session.lines().len(), 1);
        assert_eq!(session.lines()[0].quantity, 2);
        assert_eq!(session.total(), dec("39.98"));
    }
}
