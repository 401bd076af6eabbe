//! # Checkout
//!
//! One pass from cart to receipt. Every check runs before anything is
//! mutated, so a failed checkout leaves the customer, the catalog and the
//! cart exactly as they were.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Sequence                                │
//! │                                                                         │
//! │  1. cart empty? ─────────────────────────────► Err(EmptyCart)           │
//! │  2. subtotal = Σ price × qty                                            │
//! │  3. shippable units? ──► ShippingService ──► notice written, fee = 30   │
//! │                     └──► none ─────────────► fee = 0                    │
//! │  4. total = subtotal + fee                                              │
//! │  5. customer can't afford total? ────────────► Err(InsufficientBalance) │
//! │     catalog stock dropped below a line? ─────► Err(InsufficientStock)   │
//! │  ─────────────────────── nothing mutated above this line ────────────── │
//! │  6. customer.pay(total), catalog stock -= qty                           │
//! │  7. receipt written                                                     │
//! │  8. cart cleared                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;
use std::io::Write;
use tracing::{debug, info};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::customer::Customer;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::shipping::ShippingService;

const RECEIPT_SEPARATOR: &str = "----------------------";

// =============================================================================
// Receipt
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub quantity: u32,
    pub name: String,
    pub line_total: Money,
}

/// The outcome of a successful checkout.
///
/// `Display` renders the printed receipt. Line amounts use the compact form
/// (`3550.0`); the remaining balance always has two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub customer: String,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub shipping_fee: Money,
    pub total: Money,
    pub remaining_balance: Money,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** Checkout receipt **")?;
        for line in &self.lines {
            writeln!(
                f,
                "{}x {} {}",
                line.quantity,
                line.name,
                line.line_total.to_compact_string()
            )?;
        }
        writeln!(f, "{}", RECEIPT_SEPARATOR)?;
        writeln!(f, "Subtotal {}", self.subtotal.to_compact_string())?;
        writeln!(f, "Shipping {}", self.shipping_fee.to_compact_string())?;
        writeln!(f, "Amount {}", self.total.to_compact_string())?;
        writeln!(f, "Remaining Balance: {}", self.remaining_balance)
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// Checkout service. Holds no per-session state; pass the same value to as
/// many checkouts as needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkout {
    shipping: ShippingService,
}

impl Checkout {
    pub fn new(shipping: ShippingService) -> Self {
        Checkout { shipping }
    }

    pub fn shipping(&self) -> &ShippingService {
        &self.shipping
    }

    /// Runs checkout for `customer` over `cart`, deducting stock from
    /// `catalog`. The shipment notice (if any) and the receipt are written
    /// to `out` as they are produced.
    ///
    /// ## Errors
    /// - `EmptyCart` if the cart has no lines
    /// - `InsufficientBalance` if the customer can't cover subtotal + shipping
    /// - `ProductNotFound` / `InsufficientStock` if a line no longer matches
    ///   the catalog
    /// - `Output` if writing to `out` fails
    ///
    /// The shipment notice is written before the balance check, so it
    /// appears even when the customer turns out to be short.
    pub fn checkout<W: Write + ?Sized>(
        &self,
        customer: &mut Customer,
        cart: &mut Cart,
        catalog: &mut Catalog,
        out: &mut W,
    ) -> CoreResult<Receipt> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let subtotal = cart.total_price();

        let shippable = cart.shippable_items();
        let shipping_fee = if shippable.is_empty() {
            Money::zero()
        } else {
            self.shipping.calculate_shipping_fee(&shippable, &mut *out)?
        };

        let total = subtotal + shipping_fee;
        debug!(%subtotal, %shipping_fee, %total, customer = customer.name(), "checkout priced");

        if !customer.can_afford(total) {
            return Err(CoreError::InsufficientBalance {
                required: total,
                available: customer.balance(),
            });
        }

        for line in cart.lines() {
            let product = catalog.require(line.product_id)?;
            if !product.is_in_stock(line.quantity) {
                return Err(CoreError::InsufficientStock {
                    name: product.name().to_string(),
                    available: product.quantity(),
                    requested: line.quantity,
                });
            }
        }

        customer.pay(total)?;
        for line in cart.lines() {
            catalog.deduct(line.product_id, line.quantity)?;
        }

        let receipt = Receipt {
            customer: customer.name().to_string(),
            lines: cart
                .lines()
                .iter()
                .map(|line| ReceiptLine {
                    quantity: line.quantity,
                    name: line.name.clone(),
                    line_total: line.line_total(),
                })
                .collect(),
            subtotal,
            shipping_fee,
            total,
            remaining_balance: customer.balance(),
        };
        write!(out, "{}", receipt)?;

        cart.clear();
        info!(
            customer = customer.name(),
            %total,
            remaining = %receipt.remaining_balance,
            "checkout completed"
        );
        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;
    use crate::weight::Weight;
    use crate::FLAT_SHIPPING_FEE;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn fresh() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
    }

    struct Store {
        catalog: Catalog,
        cart: Cart,
    }

    /// Cheese ×2, Biscuits ×1, TV ×1, Scratch Card ×1.
    fn full_store() -> Store {
        let mut catalog = Catalog::new();
        let cheese = catalog.insert(Product::expirable("Cheese", Money::from_major(100), 5, fresh()).unwrap());
        let biscuits =
            catalog.insert(Product::expirable("Biscuits", Money::from_major(150), 3, fresh()).unwrap());
        let tv = catalog.insert(
            Product::shippable("TV", Money::from_major(3000), 2, Weight::from_kg(10.0)).unwrap(),
        );
        let card = catalog
            .insert(Product::non_expirable("Mobile Scratch Card", Money::from_major(50), 10).unwrap());

        let mut cart = Cart::new();
        for (id, qty) in [(cheese, 2), (biscuits, 1), (tv, 1), (card, 1)] {
            cart.add_as_of(catalog.get(id).unwrap(), qty, today()).unwrap();
        }
        Store { catalog, cart }
    }

    fn stock(catalog: &Catalog, name: &str) -> u32 {
        catalog.find_by_name(name).unwrap().quantity()
    }

    #[test]
    fn test_successful_checkout() {
        let Store { mut catalog, mut cart } = full_store();
        let mut customer = Customer::new("Ahmed", Money::from_major(4000));
        let mut out = Vec::new();

        let receipt = Checkout::default()
            .checkout(&mut customer, &mut cart, &mut catalog, &mut out)
            .unwrap();

        assert_eq!(receipt.subtotal, Money::from_major(3550));
        assert_eq!(receipt.shipping_fee, Money::from_major(30));
        assert_eq!(receipt.total, Money::from_major(3580));
        assert_eq!(receipt.remaining_balance, Money::from_major(420));
        assert_eq!(customer.balance(), Money::from_major(420));
        assert!(cart.is_empty());

        assert_eq!(stock(&catalog, "Cheese"), 3);
        assert_eq!(stock(&catalog, "Biscuits"), 2);
        assert_eq!(stock(&catalog, "TV"), 1);
        assert_eq!(stock(&catalog, "Mobile Scratch Card"), 9);

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "** Shipment notice **\n\
             1x TV 10000g\n\
             Total package weight 10.00kg\n\
             ** Checkout receipt **\n\
             2x Cheese 200.0\n\
             1x Biscuits 150.0\n\
             1x TV 3000.0\n\
             1x Mobile Scratch Card 50.0\n\
             ----------------------\n\
             Subtotal 3550.0\n\
             Shipping 30.0\n\
             Amount 3580.0\n\
             Remaining Balance: 420.00\n"
        );
    }

    #[test]
    fn test_insufficient_balance_changes_nothing() {
        let Store { mut catalog, mut cart } = full_store();
        let before_cart = cart.clone();
        let mut customer = Customer::new("Ahmed", Money::from_major(100));
        let mut out = Vec::new();

        let err = Checkout::default()
            .checkout(&mut customer, &mut cart, &mut catalog, &mut out)
            .unwrap_err();

        assert_eq!(err.to_string(), "Insufficient balance!");
        assert_eq!(customer.balance(), Money::from_major(100));
        assert_eq!(cart, before_cart);
        assert_eq!(stock(&catalog, "Cheese"), 5);
        assert_eq!(stock(&catalog, "TV"), 2);
        // the notice goes out before the balance check
        assert!(String::from_utf8(out).unwrap().starts_with("** Shipment notice **"));
    }

    #[test]
    fn test_empty_cart() {
        let mut catalog = Catalog::new();
        let mut cart = Cart::new();
        let mut customer = Customer::new("Ahmed", Money::from_major(4000));
        let mut out = Vec::new();

        let err = Checkout::default()
            .checkout(&mut customer, &mut cart, &mut catalog, &mut out)
            .unwrap_err();

        assert!(matches!(err, CoreError::EmptyCart));
        assert_eq!(customer.balance(), Money::from_major(4000));
        assert!(out.is_empty());
    }

    #[test]
    fn test_no_shippable_items_means_no_fee_and_no_notice() {
        let mut catalog = Catalog::new();
        let card = catalog
            .insert(Product::non_expirable("Mobile Scratch Card", Money::from_major(50), 10).unwrap());
        let mut cart = Cart::new();
        cart.add_as_of(catalog.get(card).unwrap(), 3, today()).unwrap();
        let mut customer = Customer::new("Ahmed", Money::from_major(150));
        let mut out = Vec::new();

        let receipt = Checkout::default()
            .checkout(&mut customer, &mut cart, &mut catalog, &mut out)
            .unwrap();

        assert_eq!(receipt.shipping_fee, Money::zero());
        assert_eq!(receipt.remaining_balance, Money::zero());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("** Checkout receipt **\n3x Mobile Scratch Card 150.0\n"));
        assert!(text.contains("Shipping 0.0\n"));
    }

    #[test]
    fn test_stock_drop_after_add_is_caught_before_payment() {
        let Store { mut catalog, mut cart } = full_store();
        let tv = catalog.find_by_name("TV").unwrap().id();
        catalog.deduct(tv, 2).unwrap();
        let mut customer = Customer::new("Ahmed", Money::from_major(4000));

        let err = Checkout::default()
            .checkout(&mut customer, &mut cart, &mut catalog, &mut std::io::sink())
            .unwrap_err();

        assert!(matches!(err, CoreError::InsufficientStock { available: 0, requested: 1, .. }));
        assert_eq!(customer.balance(), Money::from_major(4000));
        assert_eq!(stock(&catalog, "Cheese"), 5);
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_exact_balance_is_enough() {
        let Store { mut catalog, mut cart } = full_store();
        let mut customer = Customer::new("Ahmed", Money::from_major(3580));

        let receipt = Checkout::default()
            .checkout(&mut customer, &mut cart, &mut catalog, &mut std::io::sink())
            .unwrap();
        assert_eq!(receipt.remaining_balance, Money::zero());
    }

    #[test]
    fn test_default_checkout_uses_flat_fee() {
        assert_eq!(Checkout::default().shipping().flat_fee(), FLAT_SHIPPING_FEE);
        let custom = Checkout::new(ShippingService::new(Money::from_major(12)));
        assert_eq!(custom.shipping().flat_fee(), Money::from_major(12));
    }

    #[test]
    fn test_receipt_serializes_camel_case() {
        let Store { mut catalog, mut cart } = full_store();
        let mut customer = Customer::new("Ahmed", Money::from_major(4000));
        let receipt = Checkout::default()
            .checkout(&mut customer, &mut cart, &mut catalog, &mut std::io::sink())
            .unwrap();

        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["shippingFee"], 3000);
        assert_eq!(json["remainingBalance"], 42000);
        assert_eq!(json["lines"][0]["lineTotal"], 20000);
    }
}
