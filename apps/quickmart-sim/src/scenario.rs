//! # Scenarios
//!
//! Builds the fixed store and walks one scenario through it.
//!
//! ## Store
//! ```text
//! ┌──────────────────────┬─────────┬───────┬──────────────────────────────┐
//! │ Product              │ Price   │ Stock │ Attributes                   │
//! ├──────────────────────┼─────────┼───────┼──────────────────────────────┤
//! │ Cheese               │  100.00 │     5 │ expires (fresh)              │
//! │ Biscuits             │  150.00 │     3 │ expires (fresh / 2023-12-31) │
//! │ TV                   │ 3000.00 │     2 │ ships, 10 kg                 │
//! │ Mobile Scratch Card  │   50.00 │    10 │ -                            │
//! └──────────────────────┴─────────┴───────┴──────────────────────────────┘
//! Cart: Cheese ×2, Biscuits ×1, TV ×1, Mobile Scratch Card ×1
//! ```
//!
//! ## Transcript Rules
//! - A rejected cart add prints the bare error message and skips checkout.
//! - A failed checkout prints `Error: {message}`.

use chrono::NaiveDate;
use quickmart_core::{
    Cart, Catalog, Checkout, CoreError, Customer, Money, Product, ProductId, Receipt,
    ShippingService, Weight,
};
use std::io::Write;
use tracing::{debug, info, warn};

use crate::config::{Scenario, SimConfig};
use crate::error::{SimError, SimResult};

/// Product ids of the scenario store, in cart order.
#[derive(Debug, Clone, Copy)]
pub struct StoreItems {
    pub cheese: ProductId,
    pub biscuits: ProductId,
    pub tv: ProductId,
    pub scratch_card: ProductId,
}

/// All mutable state of one run.
#[derive(Debug)]
pub struct Session {
    pub catalog: Catalog,
    pub items: StoreItems,
    pub customer: Customer,
    pub cart: Cart,
}

/// How the run ended.
#[derive(Debug)]
pub enum Outcome {
    Completed(Receipt),
    /// A product was refused while filling the cart; checkout never ran.
    CartRejected(CoreError),
    CheckoutFailed(CoreError),
}

/// Session state after the run, with its outcome.
#[derive(Debug)]
pub struct Report {
    pub session: Session,
    pub outcome: Outcome,
}

fn stale_biscuits_expiry() -> SimResult<NaiveDate> {
    NaiveDate::from_ymd_opt(2023, 12, 31).ok_or_else(|| SimError::InvalidDate("2023-12-31".into()))
}

impl Session {
    /// Builds the catalog and customer for `config.scenario`, with an empty cart.
    pub fn build(config: &SimConfig) -> SimResult<Self> {
        let fresh = config.fresh_expiry()?;
        let biscuits_expiry = match config.scenario {
            Scenario::ExpiredProduct => stale_biscuits_expiry()?,
            _ => fresh,
        };

        let mut catalog = Catalog::new();
        let items = StoreItems {
            cheese: catalog.insert(Product::expirable("Cheese", Money::from_major(100), 5, fresh)?),
            biscuits: catalog.insert(Product::expirable(
                "Biscuits",
                Money::from_major(150),
                3,
                biscuits_expiry,
            )?),
            tv: catalog.insert(Product::shippable(
                "TV",
                Money::from_major(3000),
                2,
                Weight::from_kg(10.0),
            )?),
            scratch_card: catalog.insert(Product::non_expirable(
                "Mobile Scratch Card",
                Money::from_major(50),
                10,
            )?),
        };

        Ok(Session {
            catalog,
            items,
            customer: Customer::new(config.customer_name.clone(), config.opening_balance()),
            cart: Cart::new(),
        })
    }

    /// Adds the scenario's cart lines, stopping at the first refusal.
    pub fn fill_cart(&mut self, config: &SimConfig) -> Result<(), CoreError> {
        if config.scenario == Scenario::EmptyCart {
            return Ok(());
        }

        let lines = [
            (self.items.cheese, 2),
            (self.items.biscuits, 1),
            (self.items.tv, 1),
            (self.items.scratch_card, 1),
        ];
        for (id, quantity) in lines {
            let product = self.catalog.require(id)?;
            self.cart.add_as_of(product, quantity, config.business_date)?;
        }
        Ok(())
    }
}

/// Runs `config.scenario`, writing the transcript to `out`.
///
/// Business failures are printed and returned as an [`Outcome`]; only setup
/// and output problems come back as `Err`.
pub fn run<W: Write>(config: &SimConfig, out: &mut W) -> SimResult<Report> {
    info!(scenario = %config.scenario, date = %config.business_date, "running scenario");

    let mut session = Session::build(config)?;

    if let Err(err) = session.fill_cart(config) {
        warn!(kind = ?err.kind(), %err, "cart rejected product");
        writeln!(out, "{}", err)?;
        return Ok(Report {
            session,
            outcome: Outcome::CartRejected(err),
        });
    }
    debug!(lines = session.cart.item_count(), "cart filled");

    let checkout = Checkout::new(ShippingService::new(config.flat_shipping_fee));
    let outcome = match checkout.checkout(
        &mut session.customer,
        &mut session.cart,
        &mut session.catalog,
        &mut *out,
    ) {
        Ok(receipt) => {
            let json = serde_json::to_string(&receipt)?;
            debug!(receipt = %json, "receipt");
            Outcome::Completed(receipt)
        }
        Err(CoreError::Output(io)) => return Err(SimError::Output(io)),
        Err(err) => {
            warn!(kind = ?err.kind(), %err, "checkout failed");
            writeln!(out, "Error: {}", err)?;
            Outcome::CheckoutFailed(err)
        }
    };

    Ok(Report { session, outcome })
}
