//! The per-session shopping cart.
//!
//! A [`Cart`] is an insertion-ordered list of [`CartLine`]s, at most one per
//! product. It is a plain value: handlers load it from the visitor's session,
//! mutate it, and write it back (see [`crate::models::session`]).
//!
//! Every line present has a quantity of at least one. Setting a line's
//! quantity to zero or below removes it.

pub mod pricing;

use proscience_core::{Price, Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use pricing::{OrderSummary, PricingPolicy};

/// Largest quantity a single line may hold.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// Reasons a cart mutation is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("{0} is out of stock")]
    OutOfStock(String),

    #[error("only {available} of {name} left in stock")]
    ExceedsStock { name: String, available: u32 },

    #[error("at most 99 of one product per order")]
    ExceedsLimit,
}

/// A product and how many of it the visitor wants.
///
/// The line keeps its own copy of the product so it renders with the name and
/// price it was added at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }

    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.product.unit_price()
    }
}

/// A visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` of `product`, merging with an existing line.
    ///
    /// Returns the line's quantity after the add.
    ///
    /// # Errors
    ///
    /// Refuses a zero quantity, an out-of-stock product, and any add that
    /// would take the line past the product's stock or [`MAX_LINE_QUANTITY`].
    /// A refused add leaves the cart unchanged.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<u32, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        if !product.in_stock {
            return Err(CartError::OutOfStock(product.name.clone()));
        }

        let current = self.line(product.id).map_or(0, |line| line.quantity);
        let wanted = current.saturating_add(quantity);
        check_quantity(product, wanted)?;

        if let Some(line) = self.line_mut(product.id) {
            line.quantity = wanted;
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity: wanted,
            });
        }

        Ok(wanted)
    }

    /// Delete the line for `product_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != product_id);
        self.lines.len() != before
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or below removes the line. Unknown ids are ignored.
    /// Returns the new quantity, or `None` if no line remains.
    ///
    /// # Errors
    ///
    /// Refuses quantities above the product's stock or [`MAX_LINE_QUANTITY`];
    /// the line keeps its previous quantity.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Option<u32>, CartError> {
        if quantity <= 0 {
            self.remove_item(product_id);
            return Ok(None);
        }

        let Some(line) = self.line_mut(product_id) else {
            return Ok(None);
        };

        let wanted = u32::try_from(quantity).map_err(|_| CartError::ExceedsLimit)?;
        check_quantity(&line.product, wanted)?;
        line.quantity = wanted;

        Ok(Some(wanted))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |total, line| total.saturating_add(line.quantity))
    }

    /// Number of distinct products.
    #[must_use]
    pub fn unique_items(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
    }
}

fn check_quantity(product: &Product, wanted: u32) -> Result<(), CartError> {
    if wanted > MAX_LINE_QUANTITY {
        return Err(CartError::ExceedsLimit);
    }
    if let Some(available) = product.stock_quantity
        && wanted > available
    {
        return Err(CartError::ExceedsStock {
            name: product.name.clone(),
            available,
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proscience_core::Catalog;

    use super::*;

    fn product(id: i32, price_cents: i64) -> Product {
        let mut product = Catalog::seeded().all().first().cloned().unwrap();
        product.id = ProductId::new(id);
        product.name = format!("Product {id}");
        product.price = Decimal::new(price_cents, 2);
        product.in_stock = true;
        product.stock_quantity = None;
        product
    }

    #[test]
    fn test_add_merges_lines() {
        let a = product(1, 1000);
        let mut cart = Cart::new();

        assert_eq!(cart.add_item(&a, 2).unwrap(), 2);
        assert_eq!(cart.add_item(&a, 3).unwrap(), 5);
        assert_eq!(cart.unique_items(), 1);
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_totals_example() {
        let a = product(1, 1000);
        let b = product(2, 500);
        let mut cart = Cart::new();
        cart.add_item(&a, 2).unwrap();
        cart.add_item(&b, 1).unwrap();

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Decimal::new(25, 0));
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        for id in [3, 1, 2] {
            cart.add_item(&product(id, 100), 1).unwrap();
        }
        cart.add_item(&product(1, 100), 1).unwrap();

        let ids: Vec<i32> = cart.lines().iter().map(|l| l.product.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_remove_then_add_equals_fresh_add() {
        let a = product(1, 1999);
        let mut cart = Cart::new();
        cart.add_item(&a, 4).unwrap();
        assert!(cart.remove_item(a.id));
        assert!(!cart.remove_item(a.id));
        cart.add_item(&a, 2).unwrap();

        let mut fresh = Cart::new();
        fresh.add_item(&a, 2).unwrap();
        assert_eq!(cart, fresh);
    }

    #[test]
    fn test_update_to_zero_or_below_removes_line() {
        let a = product(1, 1000);
        let mut cart = Cart::new();
        cart.add_item(&a, 1).unwrap();

        assert_eq!(cart.update_quantity(a.id, 0).unwrap(), None);
        assert!(cart.line(a.id).is_none());

        cart.add_item(&a, 1).unwrap();
        assert_eq!(cart.update_quantity(a.id, -3).unwrap(), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_sets_quantity_and_ignores_unknown_ids() {
        let a = product(1, 1000);
        let mut cart = Cart::new();
        cart.add_item(&a, 1).unwrap();

        assert_eq!(cart.update_quantity(a.id, 7).unwrap(), Some(7));
        assert_eq!(cart.line(a.id).unwrap().quantity, 7);
        assert_eq!(cart.update_quantity(ProductId::new(42), 3).unwrap(), None);
        assert_eq!(cart.unique_items(), 1);
    }

    #[test]
    fn test_add_zero_is_rejected() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add_item(&product(1, 100), 0),
            Err(CartError::InvalidQuantity)
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_out_of_stock_is_rejected() {
        let mut a = product(1, 100);
        a.in_stock = false;
        let mut cart = Cart::new();
        assert!(matches!(cart.add_item(&a, 1), Err(CartError::OutOfStock(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_stock_bound_leaves_cart_unchanged() {
        let mut a = product(1, 100);
        a.stock_quantity = Some(5);
        let mut cart = Cart::new();
        cart.add_item(&a, 4).unwrap();

        assert_eq!(
            cart.add_item(&a, 2),
            Err(CartError::ExceedsStock {
                name: a.name.clone(),
                available: 5
            })
        );
        assert_eq!(cart.line(a.id).unwrap().quantity, 4);

        assert!(cart.update_quantity(a.id, 6).is_err());
        assert_eq!(cart.line(a.id).unwrap().quantity, 4);
        assert_eq!(cart.update_quantity(a.id, 5).unwrap(), Some(5));
    }

    #[test]
    fn test_line_limit() {
        let a = product(1, 100);
        let mut cart = Cart::new();
        cart.add_item(&a, MAX_LINE_QUANTITY).unwrap();
        assert_eq!(cart.add_item(&a, 1), Err(CartError::ExceedsLimit));
        assert_eq!(
            cart.update_quantity(a.id, i64::from(u32::MAX) + 1),
            Err(CartError::ExceedsLimit)
        );
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 1000), 2).unwrap();
        cart.add_item(&product(2, 250), 1).unwrap();
        cart.clear();

        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_total_price_matches_line_sum_after_mixed_operations() {
        let a = product(1, 1999);
        let b = product(2, 4550);
        let c = product(3, 299);
        let mut cart = Cart::new();
        cart.add_item(&a, 3).unwrap();
        cart.add_item(&b, 1).unwrap();
        cart.add_item(&c, 10).unwrap();
        cart.update_quantity(a.id, 1).unwrap();
        cart.remove_item(b.id);
        cart.add_item(&b, 2).unwrap();

        let expected: Decimal = cart
            .lines()
            .iter()
            .map(|l| l.product.price * Decimal::from(l.quantity))
            .sum();
        assert_eq!(cart.total_price(), expected);
        assert_eq!(cart.total_price(), Decimal::new(1999 + 9100 + 2990, 2));
    }

    #[test]
    fn test_cart_survives_serialization() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 1000), 2).unwrap();
        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    mod proptest_tests {
        use std::collections::BTreeMap;

        use proptest::prelude::*;

        use super::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(usize, u32),
            Update(usize, i64),
            Remove(usize),
            Clear,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => (0..12_usize, 0..40_u32).prop_map(|(i, q)| Op::Add(i, q)),
                2 => (0..12_usize, -3..120_i64).prop_map(|(i, q)| Op::Update(i, q)),
                1 => (0..12_usize).prop_map(Op::Remove),
                1 => Just(Op::Clear),
            ]
        }

        /// Largest quantity a line for `product` may reach.
        fn cap(product: &Product) -> u32 {
            product
                .stock_quantity
                .map_or(MAX_LINE_QUANTITY, |stock| stock.min(MAX_LINE_QUANTITY))
        }

        /// Apply `op` to both the cart and the expected quantities.
        fn step(cart: &mut Cart, expected: &mut BTreeMap<i32, u32>, products: &[Product], op: &Op) {
            match *op {
                Op::Add(i, quantity) => {
                    let product = products.get(i).unwrap();
                    let key = product.id.as_i32();
                    let current = expected.get(&key).copied().unwrap_or(0);
                    let allowed =
                        quantity > 0 && product.in_stock && current + quantity <= cap(product);

                    let result = cart.add_item(product, quantity);
                    assert_eq!(result.is_ok(), allowed, "{op:?} -> {result:?}");
                    if let Ok(now) = result {
                        assert_eq!(now, current + quantity);
                        expected.insert(key, now);
                    }
                }
                Op::Update(i, quantity) => {
                    let product = products.get(i).unwrap();
                    let key = product.id.as_i32();
                    let result = cart.update_quantity(product.id, quantity);
                    if quantity <= 0 {
                        assert_eq!(result, Ok(None));
                        expected.remove(&key);
                    } else if expected.contains_key(&key) {
                        let wanted = u32::try_from(quantity).unwrap();
                        if wanted <= cap(product) {
                            assert_eq!(result, Ok(Some(wanted)));
                            expected.insert(key, wanted);
                        } else {
                            assert!(result.is_err());
                        }
                    } else {
                        assert_eq!(result, Ok(None));
                    }
                }
                Op::Remove(i) => {
                    let product = products.get(i).unwrap();
                    let removed = cart.remove_item(product.id);
                    assert_eq!(removed, expected.remove(&product.id.as_i32()).is_some());
                }
                Op::Clear => {
                    cart.clear();
                    expected.clear();
                }
            }
        }

        fn check(cart: &Cart, expected: &BTreeMap<i32, u32>, products: &[Product]) {
            let mut seen = BTreeMap::new();
            for line in cart.lines() {
                assert!(line.quantity > 0);
                assert!(seen.insert(line.product.id.as_i32(), line.quantity).is_none());
            }
            assert_eq!(&seen, expected);

            let total: Decimal = expected
                .iter()
                .map(|(id, quantity)| {
                    let product = products.iter().find(|p| p.id.as_i32() == *id).unwrap();
                    product.price * Decimal::from(*quantity)
                })
                .sum();
            assert_eq!(cart.total_price(), total);
            assert_eq!(cart.total_items(), expected.values().sum::<u32>());
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Any sequence of mutations keeps one positive line per product
            /// and totals that match the lines.
            #[test]
            fn test_mutation_sequences_keep_cart_consistent(ops in prop::collection::vec(op(), 0..60)) {
                let catalog = Catalog::seeded();
                let products = catalog.all();
                prop_assert_eq!(products.len(), 12);

                let mut cart = Cart::new();
                let mut expected = BTreeMap::new();
                for op in &ops {
                    step(&mut cart, &mut expected, products, op);
                    check(&cart, &expected, products);
                }
            }
        }
    }
}
