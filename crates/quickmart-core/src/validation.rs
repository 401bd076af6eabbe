//! # Validation Module
//!
//! Input validation for catalog setup and cart operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog setup                                                │
//! │  ├── validate_product_name, validate_price                             │
//! │  └── Runs once per Product constructor                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart add                                                     │
//! │  ├── validate_quantity (THIS MODULE)                                   │
//! │  └── then stock and expiry rules (cart.rs)                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Checkout                                                     │
//! │  └── empty cart, balance, stock re-check (checkout.rs)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quickmart_core::validation::{validate_product_name, validate_quantity};
//!
//! assert!(validate_product_name("Cheese").is_ok());
//! assert!(validate_quantity(2).is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested cart quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// There is no upper cap; stock is the only limit on how many units fit
/// in a cart line.
///
/// ## User Workflow
/// ```text
/// cart.add(tv, 5)
///      │
///      ▼
/// validate_quantity(5) ← THIS FUNCTION
///      │
///      ├── qty == 0?   → Error: "quantity must be positive"
///      │
///      └── OK → stock check → expiry check → line recorded
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed for free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
