//! # Error Types
//!
//! Domain-specific error types for quickmart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quickmart-core errors (this file)                                     │
//! │  ├── CoreError        - Cart, stock, balance and checkout failures     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quickmart-sim errors (app crate)                                      │
//! │  └── SimError         - Scenario setup failures                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SimError → printed line           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Messages
//! The `Display` text of each variant is what the simulator prints, so the
//! wording of the stock, expiry, empty-cart and balance variants is fixed.

use chrono::NaiveDate;
use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Requested quantity exceeds available stock.
    ///
    /// ## When This Occurs
    /// - Adding more units to the cart than the product has
    /// - Checkout finds the catalog stock dropped after the item was added
    #[error("Not enough stock for {name}")]
    InsufficientStock {
        name: String,
        available: u32,
        requested: u32,
    },

    /// Product's expiry date has passed.
    #[error("{name} is expired.")]
    Expired { name: String, expired_on: NaiveDate },

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty!")]
    EmptyCart,

    /// Customer cannot cover subtotal plus shipping.
    #[error("Insufficient balance!")]
    InsufficientBalance { required: Money, available: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Writing the shipment notice or receipt to the output sink failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Machine-readable classification of a [`CoreError`], used as a log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    OutOfStock,
    Expired,
    EmptyCart,
    InsufficientBalance,
    Validation,
    Output,
}

impl CoreError {
    /// Returns the error's kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ProductNotFound(_) => ErrorKind::NotFound,
            CoreError::InsufficientStock { .. } => ErrorKind::OutOfStock,
            CoreError::Expired { .. } => ErrorKind::Expired,
            CoreError::EmptyCart => ErrorKind::EmptyCart,
            CoreError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            CoreError::Validation(_) => ErrorKind::Validation,
            CoreError::Output(_) => ErrorKind::Output,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before business logic runs, e.g. when a product is built with an
/// empty name or a cart line is requested with zero units.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
