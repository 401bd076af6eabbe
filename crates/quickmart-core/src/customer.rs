//! # Customer
//!
//! A named account with a spendable balance. The balance only moves through
//! [`Customer::pay`].

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    name: String,
    balance: Money,
}

impl Customer {
    pub fn new(name: impl Into<String>, balance: Money) -> Self {
        Customer {
            name: name.into(),
            balance,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// True iff the balance covers `amount` (an exact match is affordable).
    pub fn can_afford(&self, amount: Money) -> bool {
        self.balance >= amount
    }

    /// Debits `amount` from the balance.
    ///
    /// ## Errors
    /// `InsufficientBalance` if the balance does not cover it; nothing is
    /// debited in that case.
    pub fn pay(&mut self, amount: Money) -> CoreResult<()> {
        if !self.can_afford(amount) {
            return Err(CoreError::InsufficientBalance {
                required: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }
}
