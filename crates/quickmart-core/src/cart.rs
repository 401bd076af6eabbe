//! # Cart
//!
//! The shopping cart for one checkout session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller                   Cart method               Line change         │
//! │  ──────                   ───────────               ───────────         │
//! │                                                                         │
//! │  Add product ────────────► add() ──────────────────► qty = n (replace) │
//! │                                                                         │
//! │  Add more of it ─────────► add_accumulating() ─────► qty += n          │
//! │                                                                         │
//! │  Checkout succeeded ─────► clear() ────────────────► lines.clear()     │
//! │                                                                         │
//! │  Every add runs: quantity rules → stock check → expiry check            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Replace vs. Accumulate
//! `add` on a product that is already in the cart *replaces* its quantity,
//! so `add(tv, 1); add(tv, 2)` leaves 2 TVs, not 3. Use `add_accumulating`
//! to sum.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::{Product, ProductId, ShippableItem};
use crate::validation::validate_quantity;
use crate::weight::Weight;

/// A line in the cart.
///
/// ## Design Notes
/// Name, price and weight are a snapshot taken when the product was added,
/// so the cart can be read without going back to the catalog. Stock is
/// always read live from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    /// Per-unit shipping weight, `None` if the product doesn't ship.
    pub weight: Option<Weight>,
    pub quantity: u32,
}

impl CartLine {
    fn from_product(product: &Product, quantity: u32) -> Self {
        CartLine {
            product_id: product.id(),
            name: product.name().to_string(),
            unit_price: product.price(),
            weight: product.weight(),
            quantity,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }

    pub fn requires_shipping(&self) -> bool {
        self.weight.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddMode {
    Replace,
    Accumulate,
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id`
/// - Every quantity is positive and within the product's stock when added
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `quantity` units of `product` in the cart, replacing any quantity
    /// already recorded for it. Expiry is checked against today's local date.
    ///
    /// ## Errors
    /// - `Validation` if the quantity is zero
    /// - `InsufficientStock` if the product has fewer than `quantity` units
    /// - `Expired` if the product's expiry date has passed
    pub fn add(&mut self, product: &Product, quantity: u32) -> CoreResult<()> {
        self.add_as_of(product, quantity, Local::now().date_naive())
    }

    /// [`Cart::add`] with an explicit "today".
    pub fn add_as_of(&mut self, product: &Product, quantity: u32, today: NaiveDate) -> CoreResult<()> {
        self.put(product, quantity, today, AddMode::Replace)
    }

    /// Adds `quantity` units on top of whatever is already in the cart. The
    /// stock check applies to the combined quantity.
    pub fn add_accumulating(&mut self, product: &Product, quantity: u32) -> CoreResult<()> {
        self.add_accumulating_as_of(product, quantity, Local::now().date_naive())
    }

    pub fn add_accumulating_as_of(
        &mut self,
        product: &Product,
        quantity: u32,
        today: NaiveDate,
    ) -> CoreResult<()> {
        self.put(product, quantity, today, AddMode::Accumulate)
    }

    fn put(&mut self, product: &Product, quantity: u32, today: NaiveDate, mode: AddMode) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let existing = self.lines.iter().position(|l| l.product_id == product.id());
        let requested = match (mode, existing) {
            (AddMode::Accumulate, Some(i)) => self.lines[i].quantity.saturating_add(quantity),
            _ => quantity,
        };

        if !product.is_in_stock(requested) {
            return Err(CoreError::InsufficientStock {
                name: product.name().to_string(),
                available: product.quantity(),
                requested,
            });
        }

        if product.is_expired_on(today) {
            return Err(CoreError::Expired {
                name: product.name().to_string(),
                // is_expired_on only returns true when a date is present
                expired_on: product.expiry_date().unwrap_or(today),
            });
        }

        match existing {
            Some(i) => self.lines[i].quantity = requested,
            None => self.lines.push(CartLine::from_product(product, requested)),
        }
        debug!(product = product.name(), quantity = requested, ?mode, "cart line set");
        Ok(())
    }

    /// Every shippable unit in the cart, one entry per unit: 2 TVs yield two
    /// identical entries.
    pub fn shippable_items(&self) -> Vec<ShippableItem<'_>> {
        self.lines
            .iter()
            .filter_map(|line| line.weight.map(|weight| (line, weight)))
            .flat_map(|(line, weight)| {
                std::iter::repeat(ShippableItem {
                    name: &line.name,
                    weight,
                })
                .take(line.quantity as usize)
            })
            .collect()
    }

    /// Sum of price × quantity over all lines.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity recorded for a product, if it is in the cart.
    pub fn quantity_of(&self, id: ProductId) -> Option<u32> {
        self.lines
            .iter()
            .find(|l| l.product_id == id)
            .map(|l| l.quantity)
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Shippable;
    use crate::ValidationError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 6, 1)
    }

    fn cheese() -> Product {
        Product::expirable("Cheese", Money::from_major(100), 5, date(2025, 12, 31)).unwrap()
    }

    fn tv() -> Product {
        Product::shippable("TV", Money::from_major(3000), 2, Weight::from_kg(10.0)).unwrap()
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        let cheese = cheese();

        cart.add_as_of(&cheese, 2, today()).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_price(), Money::from_major(200));
        assert_eq!(cart.quantity_of(cheese.id()), Some(2));
    }

    #[test]
    fn test_cart_add_same_product_replaces_quantity() {
        let mut cart = Cart::new();
        let cheese = cheese();

        cart.add_as_of(&cheese, 2, today()).unwrap();
        cart.add_as_of(&cheese, 3, today()).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_cart_add_accumulating_sums_quantity() {
        let mut cart = Cart::new();
        let cheese = cheese();

        cart.add_accumulating_as_of(&cheese, 2, today()).unwrap();
        cart.add_accumulating_as_of(&cheese, 3, today()).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_accumulating_checks_combined_stock() {
        let mut cart = Cart::new();
        let tv = tv();

        cart.add_accumulating_as_of(&tv, 2, today()).unwrap();
        let err = cart.add_accumulating_as_of(&tv, 1, today()).unwrap_err();

        assert!(matches!(err, CoreError::InsufficientStock { requested: 3, .. }));
        assert_eq!(cart.quantity_of(tv.id()), Some(2));
    }

    #[test]
    fn test_cart_rejects_out_of_stock() {
        let mut cart = Cart::new();
        let err = cart.add_as_of(&tv(), 3, today()).unwrap_err();

        assert_eq!(err.to_string(), "Not enough stock for TV");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_stock_is_checked_before_expiry() {
        let mut cart = Cart::new();
        let stale = Product::expirable("Biscuits", Money::from_major(150), 3, date(2023, 12, 31)).unwrap();

        let err = cart.add_as_of(&stale, 4, today()).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));

        let err = cart.add_as_of(&stale, 1, today()).unwrap_err();
        assert_eq!(err.to_string(), "Biscuits is expired.");
        assert!(matches!(err, CoreError::Expired { expired_on, .. } if expired_on == date(2023, 12, 31)));
    }

    #[test]
    fn test_failed_add_keeps_earlier_lines() {
        let mut cart = Cart::new();
        let stale = Product::expirable("Biscuits", Money::from_major(150), 3, date(2023, 12, 31)).unwrap();

        cart.add_as_of(&cheese(), 2, today()).unwrap();
        assert!(cart.add_as_of(&stale, 1, today()).is_err());

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.lines()[0].name, "Cheese");
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let mut cart = Cart::new();
        let err = cart.add_as_of(&cheese(), 0, today()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_large_quantity_within_stock() {
        let mut cart = Cart::new();
        let gum = Product::non_expirable("Gum", Money::from_major(1), 5000).unwrap();

        cart.add_as_of(&gum, 1000, today()).unwrap();
        cart.add_accumulating_as_of(&gum, 4000, today()).unwrap();

        assert_eq!(cart.quantity_of(gum.id()), Some(5000));
        assert_eq!(cart.total_price(), Money::from_major(5000));
    }

    #[test]
    fn test_many_distinct_lines() {
        let mut cart = Cart::new();
        for i in 0..150 {
            let p = Product::non_expirable(format!("Item {i}"), Money::from_major(1), 1).unwrap();
            cart.add_as_of(&p, 1, today()).unwrap();
        }
        assert_eq!(cart.item_count(), 150);
    }

    #[test]
    fn test_shippable_items_repeat_per_unit() {
        let mut cart = Cart::new();
        let tv = tv();
        cart.add_as_of(&cheese(), 2, today()).unwrap();
        cart.add_as_of(&tv, 2, today()).unwrap();

        let items = cart.shippable_items();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.name() == "TV" && i.weight().grams() == 10_000));
    }

    #[test]
    fn test_no_shippable_items() {
        let mut cart = Cart::new();
        cart.add_as_of(&cheese(), 2, today()).unwrap();
        assert!(cart.shippable_items().is_empty());
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_as_of(&cheese(), 2, today()).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Money::zero());
    }
}
