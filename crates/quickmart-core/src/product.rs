//! # Products
//!
//! A product is one struct with two orthogonal, optional attributes:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Product Kinds                                   │
//! │                                                                         │
//! │                    expiry: None          expiry: Some(date)             │
//! │                  ┌─────────────────────┬─────────────────────┐          │
//! │  weight: None    │  NonExpirable       │  Expirable          │          │
//! │                  │  (Scratch Card)     │  (Cheese, Biscuits) │          │
//! │                  ├─────────────────────┼─────────────────────┤          │
//! │  weight: Some(w) │  Shippable          │  Shippable + expiry │          │
//! │                  │  (TV)               │  (via with_expiry)  │          │
//! │                  └─────────────────────┴─────────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is only ever lowered through [`Product::deduct_quantity`], which
//! refuses to go below zero.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_price, validate_product_name};
use crate::weight::Weight;

// =============================================================================
// Product Id
// =============================================================================

/// Identity key of a product (UUID v4).
///
/// Two products with the same name are still distinct cart entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(Uuid);

impl ProductId {
    pub fn new() -> Self {
        ProductId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Shippable Capability
// =============================================================================

/// Anything the shipping service can weigh and list on a manifest.
pub trait Shippable {
    fn name(&self) -> &str;

    /// Weight of a single unit.
    fn weight(&self) -> Weight;
}

/// One unit of a shippable product, as handed to the shipping service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippableItem<'a> {
    pub name: &'a str,
    pub weight: Weight,
}

impl Shippable for ShippableItem<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn weight(&self) -> Weight {
        self.weight
    }
}

// =============================================================================
// Product
// =============================================================================

/// Which constructor family a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Expirable,
    NonExpirable,
    Shippable,
}

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    quantity: u32,
    expiry_date: Option<NaiveDate>,
    shipping_weight: Option<Weight>,
}

impl Product {
    fn build(
        name: impl Into<String>,
        price: Money,
        quantity: u32,
        expiry_date: Option<NaiveDate>,
        shipping_weight: Option<Weight>,
    ) -> CoreResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price(price)?;

        Ok(Product {
            id: ProductId::new(),
            name,
            price,
            quantity,
            expiry_date,
            shipping_weight,
        })
    }

    /// A product that goes off after `expiry_date` and needs no shipping.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use quickmart_core::{Money, Product};
    ///
    /// let expiry = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    /// let cheese = Product::expirable("Cheese", Money::from_major(100), 5, expiry).unwrap();
    /// assert!(cheese.is_expired_on(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
    /// assert!(!cheese.is_expired_on(expiry));
    /// ```
    pub fn expirable(
        name: impl Into<String>,
        price: Money,
        quantity: u32,
        expiry_date: NaiveDate,
    ) -> CoreResult<Self> {
        Self::build(name, price, quantity, Some(expiry_date), None)
    }

    pub fn non_expirable(name: impl Into<String>, price: Money, quantity: u32) -> CoreResult<Self> {
        Self::build(name, price, quantity, None, None)
    }

    /// A non-expiring product that ships at `weight` per unit.
    pub fn shippable(
        name: impl Into<String>,
        price: Money,
        quantity: u32,
        weight: Weight,
    ) -> CoreResult<Self> {
        Self::build(name, price, quantity, None, Some(weight))
    }

    /// Adds an expiry date to any product, e.g. a shippable perishable.
    pub fn with_expiry(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Units currently in stock.
    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[inline]
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }

    #[inline]
    pub fn has_expiry(&self) -> bool {
        self.expiry_date.is_some()
    }

    #[inline]
    pub fn requires_shipping(&self) -> bool {
        self.shipping_weight.is_some()
    }

    /// Per-unit shipping weight, `None` for products that don't ship.
    #[inline]
    pub fn weight(&self) -> Option<Weight> {
        self.shipping_weight
    }

    pub fn kind(&self) -> ProductKind {
        match (self.shipping_weight, self.expiry_date) {
            (Some(_), _) => ProductKind::Shippable,
            (None, Some(_)) => ProductKind::Expirable,
            (None, None) => ProductKind::NonExpirable,
        }
    }

    /// Shipping view of one unit, if this product ships.
    pub fn shipping_info(&self) -> Option<ShippableItem<'_>> {
        self.shipping_weight.map(|weight| ShippableItem {
            name: &self.name,
            weight,
        })
    }

    /// True iff at least `requested` units are in stock.
    #[inline]
    pub fn is_in_stock(&self, requested: u32) -> bool {
        self.quantity >= requested
    }

    /// Expiry check against the local calendar date.
    pub fn is_expired(&self) -> bool {
        self.is_expired_on(Local::now().date_naive())
    }

    /// True iff the product has an expiry date and `today` is strictly after it.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        matches!(self.expiry_date, Some(expiry) if today > expiry)
    }

    /// Removes `amount` units from stock.
    ///
    /// ## Errors
    /// `InsufficientStock` if `amount` exceeds the units on hand; stock is
    /// left unchanged.
    pub fn deduct_quantity(&mut self, amount: u32) -> CoreResult<()> {
        self.quantity = self
            .quantity
            .checked_sub(amount)
            .ok_or_else(|| CoreError::InsufficientStock {
                name: self.name.clone(),
                available: self.quantity,
                requested: amount,
            })?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
