//! # quickmart-core: Checkout Rules for QuickMart
//!
//! Pure business logic for a small point-of-sale checkout: a catalog of
//! products with optional expiry and shipping weight, a cart, a customer
//! balance, flat-rate shipping and the checkout pass that ties them together.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       QuickMart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 quickmart-sim (binary)                          │   │
//! │  │   logging setup • scenario catalog • prints to stdout           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ quickmart-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │ product  │ │   cart   │ │ shipping │ │    checkout      │  │   │
//! │  │   │ catalog  │ │ CartLine │ │  notice  │ │    Receipt       │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  money   │ │  weight  │ │ customer │ │   validation     │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO STDOUT • NO ENV • text goes to a caller-supplied Write     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Integer Units**: money in cents, weight in milligrams
//! 2. **Check, then mutate**: a failed checkout changes nothing
//! 3. **Explicit Errors**: every failure is a `CoreError` variant
//!
//! ## Example Usage
//!
//! ```rust
//! use quickmart_core::{Cart, Catalog, Checkout, Customer, Money, Product, Weight};
//!
//! let mut catalog = Catalog::new();
//! let tv = catalog.insert(
//!     Product::shippable("TV", Money::from_major(3000), 2, Weight::from_kg(10.0)).unwrap(),
//! );
//!
//! let mut cart = Cart::new();
//! cart.add(catalog.get(tv).unwrap(), 1).unwrap();
//!
//! let mut customer = Customer::new("Ahmed", Money::from_major(4000));
//! let mut out = Vec::new();
//! let receipt = Checkout::default()
//!     .checkout(&mut customer, &mut cart, &mut catalog, &mut out)
//!     .unwrap();
//!
//! assert_eq!(receipt.total, Money::from_major(3030));
//! assert_eq!(customer.balance(), Money::from_major(970));
//! assert!(cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customer;
pub mod error;
pub mod money;
pub mod product;
pub mod shipping;
pub mod validation;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use catalog::Catalog;
pub use checkout::{Checkout, Receipt, ReceiptLine};
pub use customer::Customer;
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use product::{Product, ProductId, ProductKind, Shippable, ShippableItem};
pub use shipping::{ShipmentEntry, ShipmentNotice, ShippingQuote, ShippingService};
pub use weight::Weight;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Shipping charge per checkout, whatever the weight or number of units.
pub const FLAT_SHIPPING_FEE: Money = Money::from_major(30);
