//! The shopping cart state machine.
//!
//! A cart is an ordered collection of lines, one per distinct
//! `(product_id, size, color)` variant key. Adding an existing variant
//! increments its quantity rather than appending a duplicate; updating a
//! quantity to zero or below removes the line. Order is insertion order and
//! is stable so list rendering does not reshuffle.
//!
//! This module is pure state - persistence and backend calls live in
//! [`crate::store`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use saahaz_core::{Price, ProductId};

/// Identity key for cart-line merge decisions.
///
/// Two lines with the same key are the same logical entry and are coalesced,
/// never duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl VariantKey {
    /// Create a variant key.
    #[must_use]
    pub const fn new(product_id: ProductId, size: Option<String>, color: Option<String>) -> Self {
        Self {
            product_id,
            size,
            color,
        }
    }
}

/// One cart entry: a product variant and a quantity.
///
/// Field names match the backend's order-item wire shape, so lines can be
/// submitted at checkout without conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CartLine {
    /// The variant key identifying this line.
    #[must_use]
    pub fn key(&self) -> VariantKey {
        VariantKey::new(self.product_id.clone(), self.size.clone(), self.color.clone())
    }

    fn matches(&self, key: &VariantKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }
}

/// An ordered collection of cart lines.
///
/// Invariant: at most one line exists per distinct variant key, and every
/// line has a positive quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines (not total quantity).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    ///
    /// Recomputed on every read; the cart itself is the only cache.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Add `quantity` of a product variant.
    ///
    /// If a line with the same variant key exists its quantity is
    /// incremented; otherwise a new line is appended. A zero quantity is a
    /// logged no-op - callers are responsible for quantity positivity, and
    /// this operation never creates a zero-quantity line.
    pub fn add(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) {
        if quantity == 0 {
            warn!(product_id = %product_id, "Ignoring add of zero quantity");
            return;
        }

        let key = VariantKey::new(product_id, size, color);
        if let Some(line) = self.lines.iter_mut().find(|line| line.matches(&key)) {
            line.quantity += quantity;
            return;
        }

        self.lines.push(CartLine {
            product_id: key.product_id,
            quantity,
            size: key.size,
            color: key.color,
        });
    }

    /// Remove the line matching `key` exactly. Absence is a no-op.
    pub fn remove(&mut self, key: &VariantKey) {
        self.lines.retain(|line| !line.matches(key));
    }

    /// Replace the quantity of the line matching `key`.
    ///
    /// A quantity of zero or below removes the line entirely; this is
    /// defined behavior, not an error. No-op if the key is absent.
    pub fn update_quantity(&mut self, key: &VariantKey, quantity: u32) {
        if quantity == 0 {
            self.remove(key);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.matches(key)) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Derived subtotal given a price lookup.
    ///
    /// Products missing from the lookup contribute nothing; the backend
    /// recomputes the authoritative subtotal at order time.
    pub fn subtotal<F>(&self, price_of: F) -> Price
    where
        F: Fn(&ProductId) -> Option<Price>,
    {
        self.lines
            .iter()
            .filter_map(|line| price_of(&line.product_id).map(|price| price.times(line.quantity)))
            .sum()
    }

    /// Serialize the cart for persistence: a JSON array of lines.
    #[must_use]
    pub fn to_snapshot(&self) -> String {
        serde_json::to_string(&self.lines).unwrap_or_else(|_| "[]".to_string())
    }

    /// Restore a cart from a persisted snapshot.
    ///
    /// Returns `None` if the snapshot is not a valid sequence of lines;
    /// callers treat that as absence and start from an empty cart. Lines
    /// with zero quantity in the snapshot are dropped to re-establish the
    /// positive-quantity invariant.
    #[must_use]
    pub fn from_snapshot(snapshot: &str) -> Option<Self> {
        let mut lines: Vec<CartLine> = serde_json::from_str(snapshot).ok()?;
        lines.retain(|line| line.quantity > 0);
        Some(Self { lines })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn key(product: &str, size: Option<&str>, color: Option<&str>) -> VariantKey {
        VariantKey::new(
            ProductId::new(product),
            size.map(String::from),
            color.map(String::from),
        )
    }

    #[test]
    fn test_add_merges_same_variant() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("P1"), 1, Some("M".into()), Some("Blue".into()));
        cart.add(ProductId::new("P1"), 2, Some("M".into()), Some("Blue".into()));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_add_distinct_variants_do_not_merge() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("P1"), 1, Some("M".into()), Some("Blue".into()));
        cart.add(ProductId::new("P1"), 1, Some("L".into()), Some("Blue".into()));

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_add_without_variant_is_its_own_key() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("P1"), 1, None, None);
        cart.add(ProductId::new("P1"), 1, Some("M".into()), None);
        cart.add(ProductId::new("P1"), 1, None, None);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("P1"), 0, None, None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("P1"), 2, Some("M".into()), Some("Blue".into()));
        cart.update_quantity(&key("P1", Some("M"), Some("Blue")), 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_replaces_not_increments() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("P1"), 2, None, None);
        cart.update_quantity(&key("P1", None, None), 5);

        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_update_quantity_missing_key_is_noop() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("P1"), 2, None, None);
        cart.update_quantity(&key("P2", None, None), 7);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("P1"), 1, Some("M".into()), None);

        let k = key("P1", Some("M"), None);
        cart.remove(&k);
        cart.remove(&k);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_exact_key_only() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("P1"), 1, Some("M".into()), None);
        cart.add(ProductId::new("P1"), 1, Some("L".into()), None);

        cart.remove(&key("P1", Some("M"), None));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].size.as_deref(), Some("L"));
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("P1"), 2, None, None);
        cart.add(ProductId::new("P2"), 3, None, None);

        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("P1"), 1, None, None);
        cart.add(ProductId::new("P2"), 1, None, None);
        cart.add(ProductId::new("P1"), 1, None, None);

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2"]);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("P1"), 2, Some("M".into()), Some("Blue".into()));
        cart.add(ProductId::new("P2"), 1, None, None);

        let restored = Cart::from_snapshot(&cart.to_snapshot()).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        assert!(Cart::from_snapshot("not json").is_none());
        assert!(Cart::from_snapshot("{\"cart\":true}").is_none());
        assert!(Cart::from_snapshot("[1,2,3]").is_none());
    }

    #[test]
    fn test_snapshot_drops_zero_quantity_lines() {
        let snapshot = "[{\"product_id\":\"P1\",\"quantity\":0},{\"product_id\":\"P2\",\"quantity\":2}]";
        let cart = Cart::from_snapshot(snapshot).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].product_id.as_str(), "P2");
    }

    #[test]
    fn test_subtotal_skips_unknown_products() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("P1"), 2, None, None);
        cart.add(ProductId::new("P2"), 1, None, None);

        let subtotal = cart.subtotal(|id| {
            (id.as_str() == "P1").then(|| Price::from_cents(1500))
        });

        assert_eq!(subtotal, Price::from_cents(3000));
    }

    #[test]
    fn test_item_count_tracks_randomized_mutations() {
        use rand::Rng;

        let mut rng = rand::rng();
        let mut cart = Cart::new();
        let products = ["P1", "P2", "P3"];
        let sizes = [None, Some("S"), Some("M")];

        for _ in 0..500 {
            let product = products[rng.random_range(0..products.len())];
            let size = sizes[rng.random_range(0..sizes.len())].map(String::from);
            let k = VariantKey::new(ProductId::new(product), size.clone(), None);

            match rng.random_range(0..3) {
                0 => cart.add(ProductId::new(product), rng.random_range(1..4), size, None),
                1 => cart.remove(&k),
                _ => cart.update_quantity(&k, rng.random_range(0..4)),
            }

            // Derived count always equals the sum over current lines, and
            // no line ever sits at zero quantity.
            let expected: u32 = cart.lines().iter().map(|l| l.quantity).sum();
            assert_eq!(cart.item_count(), expected);
            assert!(cart.lines().iter().all(|l| l.quantity > 0));

            // One line per distinct variant key.
            let mut keys: Vec<VariantKey> = cart.lines().iter().map(CartLine::key).collect();
            let before = keys.len();
            keys.sort_by(|a, b| {
                (a.product_id.as_str(), &a.size, &a.color)
                    .cmp(&(b.product_id.as_str(), &b.size, &b.color))
            });
            keys.dedup();
            assert_eq!(keys.len(), before);
        }
    }
}
