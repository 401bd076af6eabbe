//! # Weight Module
//!
//! Shipping weight stored as whole milligrams, mirroring how [`Money`] stores
//! cents. Kilogram inputs are rounded to the nearest milligram once, at the
//! edge. Grams are derived by truncation, so a 1.5 g unit reads as `1g`.
//!
//! [`Money`]: crate::money::Money

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

const MG_PER_GRAM: u64 = 1_000;
const MG_PER_KG: f64 = 1_000_000.0;

/// A non-negative weight in milligrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Weight(u64);

impl Weight {
    #[inline]
    pub const fn from_milligrams(mg: u64) -> Self {
        Weight(mg)
    }

    #[inline]
    pub const fn from_grams(grams: u64) -> Self {
        Weight(grams.saturating_mul(MG_PER_GRAM))
    }

    /// Converts kilograms, rounding to the nearest milligram.
    /// Negative and non-finite inputs clamp to zero.
    pub fn from_kg(kg: f64) -> Self {
        if !kg.is_finite() || kg <= 0.0 {
            return Weight(0);
        }
        Weight((kg * MG_PER_KG).round() as u64)
    }

    #[inline]
    pub const fn milligrams(&self) -> u64 {
        self.0
    }

    /// Whole grams, truncated.
    #[inline]
    pub const fn grams(&self) -> u64 {
        self.0 / MG_PER_GRAM
    }

    /// Kilograms, for display only.
    #[inline]
    pub fn kg(&self) -> f64 {
        self.0 as f64 / MG_PER_KG
    }

    #[inline]
    pub const fn zero() -> Self {
        Weight(0)
    }
}

/// Kilograms with two decimals: `10.00kg`.
impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}kg", self.kg())
    }
}

impl Add for Weight {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Weight(self.0 + other.0)
    }
}

impl Mul<u32> for Weight {
    type Output = Self;

    #[inline]
    fn mul(self, count: u32) -> Self {
        Weight(self.0 * count as u64)
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Self {
        iter.fold(Weight::zero(), Add::add)
    }
}
