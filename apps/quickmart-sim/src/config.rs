//! # Simulator Configuration
//!
//! Everything a run needs, built in code. There are no flags, files or
//! environment variables for the scenario itself; only `RUST_LOG` (read in
//! `lib.rs`) tunes logging.
//!
//! ## Defaults
//! - Scenario: [`ACTIVE_SCENARIO`]
//! - Customer: "Ahmed"
//! - Business date: today (local)
//! - Fresh goods expire 365 days after the business date
//! - Shipping: [`FLAT_SHIPPING_FEE`]

use chrono::{Days, Local, NaiveDate};
use quickmart_core::{Money, FLAT_SHIPPING_FEE};
use std::fmt;

use crate::error::{SimError, SimResult};

/// The four built-in runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Enough balance, nothing expired: prints a full receipt.
    Success,
    /// Same cart, balance of 100: checkout is refused.
    InsufficientBalance,
    /// Biscuits expired on 2023-12-31: the cart refuses them.
    ExpiredProduct,
    /// Nothing is added: checkout is refused.
    EmptyCart,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Success,
        Scenario::InsufficientBalance,
        Scenario::ExpiredProduct,
        Scenario::EmptyCart,
    ];
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scenario::Success => "success",
            Scenario::InsufficientBalance => "insufficient-balance",
            Scenario::ExpiredProduct => "expired-product",
            Scenario::EmptyCart => "empty-cart",
        };
        f.write_str(name)
    }
}

/// Scenario the binary runs.
pub const ACTIVE_SCENARIO: Scenario = Scenario::Success;

/// Days between the business date and the expiry of fresh goods.
pub const FRESH_SHELF_LIFE_DAYS: u64 = 365;

/// Run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub scenario: Scenario,

    pub customer_name: String,

    /// The "today" used for every expiry check in the run.
    pub business_date: NaiveDate,

    pub fresh_shelf_life_days: u64,

    pub flat_shipping_fee: Money,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            scenario: ACTIVE_SCENARIO,
            customer_name: "Ahmed".to_string(),
            business_date: Local::now().date_naive(),
            fresh_shelf_life_days: FRESH_SHELF_LIFE_DAYS,
            flat_shipping_fee: FLAT_SHIPPING_FEE,
        }
    }
}

impl SimConfig {
    /// Default configuration for another scenario.
    pub fn for_scenario(scenario: Scenario) -> Self {
        SimConfig {
            scenario,
            ..Self::default()
        }
    }

    /// Pins the business date, for reproducible runs.
    pub fn with_business_date(mut self, date: NaiveDate) -> Self {
        self.business_date = date;
        self
    }

    /// Expiry date of goods that are fresh in this run.
    pub fn fresh_expiry(&self) -> SimResult<NaiveDate> {
        self.business_date
            .checked_add_days(Days::new(self.fresh_shelf_life_days))
            .ok_or_else(|| {
                SimError::InvalidDate(format!(
                    "{} + {} days",
                    self.business_date, self.fresh_shelf_life_days
                ))
            })
    }

    /// Customer's balance at the start of the run.
    pub fn opening_balance(&self) -> Money {
        match self.scenario {
            Scenario::InsufficientBalance => Money::from_major(100),
            _ => Money::from_major(4000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.scenario, ACTIVE_SCENARIO);
        assert_eq!(config.customer_name, "Ahmed");
        assert_eq!(config.flat_shipping_fee, Money::from_major(30));
    }

    #[test]
    fn test_opening_balance() {
        assert_eq!(
            SimConfig::for_scenario(Scenario::Success).opening_balance(),
            Money::from_major(4000)
        );
        assert_eq!(
            SimConfig::for_scenario(Scenario::InsufficientBalance).opening_balance(),
            Money::from_major(100)
        );
    }

    #[test]
    fn test_fresh_expiry() {
        let config = SimConfig::default()
            .with_business_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(
            config.fresh_expiry().unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_fresh_expiry_overflow() {
        let config = SimConfig::default().with_business_date(NaiveDate::MAX);
        assert!(matches!(config.fresh_expiry(), Err(SimError::InvalidDate(_))));
    }

    #[test]
    fn test_scenario_names() {
        let names: Vec<String> = Scenario::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            ["success", "insufficient-balance", "expired-product", "empty-cart"]
        );
    }
}
