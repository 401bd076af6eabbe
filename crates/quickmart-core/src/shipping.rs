//! # Shipping Service
//!
//! Builds the shipment notice for the shippable units in a cart and charges
//! a flat fee.
//!
//! ## Notice Format
//! ```text
//! ** Shipment notice **
//! 2x TV 20000g                  ← count, name, unit weight × count, truncated to grams
//! 1x Speaker 700g
//! Total package weight 20.70kg  ← sum of every unit's weight
//! ```
//!
//! The fee does not depend on weight or count.

use serde::Serialize;
use std::fmt;
use std::io::Write;
use tracing::debug;

use crate::error::CoreResult;
use crate::money::Money;
use crate::product::Shippable;
use crate::weight::Weight;
use crate::FLAT_SHIPPING_FEE;

/// One manifest row: all units sharing a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentEntry {
    pub name: String,
    pub count: u32,
    pub unit_weight: Weight,
}

impl ShipmentEntry {
    pub fn total_weight(&self) -> Weight {
        self.unit_weight * self.count
    }
}

/// The manifest printed before payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentNotice {
    pub entries: Vec<ShipmentEntry>,
    pub total_weight: Weight,
}

impl fmt::Display for ShipmentNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** Shipment notice **")?;
        for entry in &self.entries {
            writeln!(
                f,
                "{}x {} {}g",
                entry.count,
                entry.name,
                entry.total_weight().grams()
            )?;
        }
        writeln!(f, "Total package weight {}", self.total_weight)
    }
}

/// Fee plus the notice it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingQuote {
    pub fee: Money,
    pub notice: ShipmentNotice,
}

/// Flat-rate shipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingService {
    flat_fee: Money,
}

impl Default for ShippingService {
    fn default() -> Self {
        ShippingService {
            flat_fee: FLAT_SHIPPING_FEE,
        }
    }
}

impl ShippingService {
    pub fn new(flat_fee: Money) -> Self {
        ShippingService { flat_fee }
    }

    pub fn flat_fee(&self) -> Money {
        self.flat_fee
    }

    /// Groups `items` by name and prices the shipment.
    ///
    /// Rows keep the order in which each name first appears. If two units
    /// share a name but weigh differently, the row uses the last one seen;
    /// the package total still adds up every unit's own weight.
    pub fn quote<S: Shippable>(&self, items: &[S]) -> ShippingQuote {
        let mut entries: Vec<ShipmentEntry> = Vec::new();
        for item in items {
            match entries.iter_mut().find(|e| e.name == item.name()) {
                Some(entry) => {
                    entry.count += 1;
                    entry.unit_weight = item.weight();
                }
                None => entries.push(ShipmentEntry {
                    name: item.name().to_string(),
                    count: 1,
                    unit_weight: item.weight(),
                }),
            }
        }

        let total_weight: Weight = items.iter().map(Shippable::weight).sum();
        debug!(units = items.len(), rows = entries.len(), %total_weight, "shipment quoted");

        ShippingQuote {
            fee: self.flat_fee,
            notice: ShipmentNotice {
                entries,
                total_weight,
            },
        }
    }

    /// Writes the shipment notice for `items` to `out` and returns the fee.
    pub fn calculate_shipping_fee<S, W>(&self, items: &[S], out: &mut W) -> CoreResult<Money>
    where
        S: Shippable,
        W: Write + ?Sized,
    {
        let quote = self.quote(items);
        write!(out, "{}", quote.notice)?;
        Ok(quote.fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ShippableItem;

    fn unit(name: &str, grams: u64) -> ShippableItem<'_> {
        ShippableItem {
            name,
            weight: Weight::from_grams(grams),
        }
    }

    #[test]
    fn test_single_tv_notice() {
        let mut out = Vec::new();
        let fee = ShippingService::default()
            .calculate_shipping_fee(&[unit("TV", 10_000)], &mut out)
            .unwrap();

        assert_eq!(fee, Money::from_major(30));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "** Shipment notice **\n1x TV 10000g\nTotal package weight 10.00kg\n"
        );
    }

    #[test]
    fn test_groups_units_by_name_in_first_seen_order() {
        let items = [
            unit("TV", 10_000),
            unit("Speaker", 700),
            unit("TV", 10_000),
        ];
        let quote = ShippingService::default().quote(&items);

        assert_eq!(quote.notice.entries.len(), 2);
        assert_eq!(quote.notice.entries[0].name, "TV");
        assert_eq!(quote.notice.entries[0].count, 2);
        assert_eq!(quote.notice.entries[0].total_weight().grams(), 20_000);
        assert_eq!(quote.notice.entries[1].name, "Speaker");
        assert_eq!(quote.notice.total_weight.grams(), 20_700);
        assert_eq!(
            quote.notice.to_string(),
            "** Shipment notice **\n2x TV 20000g\n1x Speaker 700g\nTotal package weight 20.70kg\n"
        );
    }

    #[test]
    fn test_same_name_last_weight_wins() {
        let items = [unit("Box", 1_000), unit("Box", 3_000)];
        let quote = ShippingService::default().quote(&items);

        assert_eq!(quote.notice.entries[0].unit_weight.grams(), 3_000);
        assert_eq!(quote.notice.entries[0].total_weight().grams(), 6_000);
        // total is per unit, not per row
        assert_eq!(quote.notice.total_weight.grams(), 4_000);
    }

    #[test]
    fn test_fee_is_flat() {
        let service = ShippingService::default();
        let light = service.quote(&[unit("Card", 1)]);
        let heavy = service.quote(&vec![unit("Piano", 250_000); 5]);
        assert_eq!(light.fee, heavy.fee);
        assert_eq!(light.fee, FLAT_SHIPPING_FEE);
    }

    #[test]
    fn test_custom_flat_fee() {
        let service = ShippingService::new(Money::from_major(45));
        assert_eq!(service.flat_fee(), Money::from_major(45));
        assert_eq!(service.quote(&[unit("TV", 10_000)]).fee, Money::from_major(45));
    }

    #[test]
    fn test_sub_gram_weights_truncate_per_row() {
        let pin = ShippableItem {
            name: "Pin",
            weight: Weight::from_kg(0.0015),
        };
        let mut out = Vec::new();
        ShippingService::default()
            .calculate_shipping_fee(&[pin], &mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "** Shipment notice **\n1x Pin 1g\nTotal package weight 0.00kg\n"
        );

        let notice = ShippingService::default().quote(&[pin; 3]).notice;
        assert_eq!(notice.to_string().lines().nth(1), Some("3x Pin 4g"));
    }
}
