//! # Simulator Error Type
//!
//! Failures that stop a scenario from producing its transcript. Business
//! outcomes (expired product, short balance, ...) are not errors here: they
//! are printed and reported as a [`crate::scenario::Outcome`].

use quickmart_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Catalog or customer setup was rejected by the core rules.
    #[error("Scenario setup failed: {0}")]
    Setup(#[from] CoreError),

    /// A scenario date fell outside the calendar.
    #[error("Invalid scenario date: {0}")]
    InvalidDate(String),

    /// Writing the transcript failed.
    #[error("Failed to write transcript: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to encode receipt: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
