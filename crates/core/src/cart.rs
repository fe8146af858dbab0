//! The cart engine: pure operations over an owned cart value.
//!
//! The cart is an explicitly owned value, mutated only through the methods
//! here. Persistence is a separate, explicit step layered on top by the
//! client crate (write-through after every mutation); nothing in this module
//! performs I/O.
//!
//! Invariants maintained by every operation:
//! - at most one line per product id (merge-on-add, never duplicate)
//! - line quantity is always >= 1; a quantity reaching zero deletes the line
//! - insertion order of lines is preserved for display

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::ProductId;

/// One cart line: a product snapshot plus a quantity.
///
/// The snapshot is the product as it looked when the buyer added it. Its
/// price is advisory only; checkout re-prices from the catalog of record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// The product id this line refers to.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Snapshot price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// An ordered collection of cart lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Restore a cart from previously persisted lines, de-duplicating on
    /// product id. Persisted data is not trusted to uphold the merge
    /// invariant, so duplicate ids fold into the first line.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.line_mut(&line.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Add one unit of `product`.
    ///
    /// If a line for the product already exists its quantity increments by
    /// one; otherwise a new line with quantity 1 is appended. Stale
    /// snapshots are accepted as-is; price correctness is enforced at
    /// checkout, not here.
    pub fn add(&mut self, product: Product) {
        match self.line_mut(&product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product,
                quantity: 1,
            }),
        }
    }

    /// Remove the line for `id` if present. Idempotent.
    pub fn remove(&mut self, id: &ProductId) {
        self.lines.retain(|line| line.product.id != *id);
    }

    /// Adjust the quantity of the line for `id` by `delta`.
    ///
    /// A resulting quantity of zero or less removes the line. No upper
    /// bound is enforced beyond `u32::MAX` saturation. A delta for an
    /// unknown id is a no-op.
    pub fn change_quantity(&mut self, id: &ProductId, delta: i64) {
        let Some(line) = self.line_mut(id) else {
            return;
        };

        let updated = i64::from(line.quantity).saturating_add(delta);
        if updated <= 0 {
            self.remove(id);
        } else {
            line.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        }
    }

    /// Empty the cart. Used after a successful checkout or on explicit
    /// user action.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Exact sum of snapshot price times quantity over all lines.
    ///
    /// No rounding happens inside the sum; rounding belongs to the
    /// presentation and verification boundaries.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities across lines, for the cart badge.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for `id`, if any.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == *id)
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product.id == *id)
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
            review_count: 10,
            badge: None,
        }
    }

    #[test]
    fn test_add_same_product_twice_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.add(product("p1", "10.00"));
        cart.add(product("p1", "10.00"));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_merges_even_with_stale_snapshot() {
        let mut cart = Cart::new();
        cart.add(product("p1", "10.00"));
        // Price drifted in the catalog; the line still merges on id.
        cart.add(product("p1", "12.00"));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        // The original snapshot price is kept; checkout re-prices anyway.
        assert_eq!(cart.lines()[0].product.price, dec("10.00"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(product("p1", "10.00"));

        let id = ProductId::new("p1");
        cart.remove(&id);
        cart.remove(&id);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_updates_in_place() {
        let mut cart = Cart::new();
        cart.add(product("p1", "10.00"));
        cart.change_quantity(&ProductId::new("p1"), 3);

        assert_eq!(cart.line(&ProductId::new("p1")).unwrap().quantity, 4);
    }

    #[test]
    fn test_change_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(product("p1", "10.00"));
        cart.change_quantity(&ProductId::new("p1"), 1);

        // Quantity is now 2; -2 floors at zero and deletes the line.
        cart.change_quantity(&ProductId::new("p1"), -2);
        assert!(cart.line(&ProductId::new("p1")).is_none());
    }

    #[test]
    fn test_change_quantity_below_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(product("p1", "10.00"));
        cart.change_quantity(&ProductId::new("p1"), -100);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("p1", "10.00"));
        cart.change_quantity(&ProductId::new("missing"), 5);

        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_total_is_exact_over_mixed_operations() {
        let mut cart = Cart::new();
        cart.add(product("p1", "10.00"));
        cart.add(product("p2", "5.50"));
        cart.add(product("p1", "10.00"));
        cart.change_quantity(&ProductId::new("p2"), 2);
        cart.remove(&ProductId::new("p1"));
        cart.add(product("p3", "0.10"));

        // p2: 3 x 5.50 + p3: 1 x 0.10
        assert_eq!(cart.total(), dec("16.60"));
        assert_eq!(cart.count(), 4);
    }

    #[test]
    fn test_total_has_no_float_drift() {
        let mut cart = Cart::new();
        for _ in 0..100 {
            cart.add(product("p1", "0.10"));
        }
        assert_eq!(cart.total(), dec("10.00"));
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add(product("p1", "10.00"));
        cart.add(product("p2", "5.50"));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(product("b", "1.00"));
        cart.add(product("a", "1.00"));
        cart.add(product("c", "1.00"));
        cart.add(product("a", "1.00"));

        let ids: Vec<&str> = cart
            .lines()
            .iter()
            .map(|line| line.product_id().as_str())
            .collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = Cart::new();
        cart.add(product("p1", "10.00"));
        cart.add(product("p2", "5.50"));
        cart.change_quantity(&ProductId::new("p1"), 2);

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_from_lines_folds_duplicates_and_drops_zero_quantities() {
        let lines = vec![
            CartLine {
                product: product("p1", "10.00"),
                quantity: 1,
            },
            CartLine {
                product: product("p2", "5.50"),
                quantity: 0,
            },
            CartLine {
                product: product("p1", "10.00"),
                quantity: 2,
            },
        ];

        let cart = Cart::from_lines(lines);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(&ProductId::new("p1")).unwrap().quantity, 3);
    }
}
