//! Chargeable Amounts

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{OrderError, Result};

/// A price that may be sent for authorization (at least 1 unit).
///
/// There is no way to build one from a smaller value, so code holding a
/// `ChargeableAmount` never needs to re-check the minimum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChargeableAmount(Decimal);

impl ChargeableAmount {
    /// Smallest total that can be charged
    pub const MINIMUM: Decimal = Decimal::ONE;

    /// Build from a price, `None` when it is below the minimum
    pub fn new(price: Decimal) -> Option<Self> {
        Self::try_from(price).ok()
    }

    /// The price as sent to the backend
    pub const fn price(self) -> Decimal {
        self.0
    }

    /// The price in the currency's smallest unit (cents), rounded half-even
    pub fn to_minor_units(self) -> Option<i64> {
        (self.0 * Decimal::ONE_HUNDRED).round().to_i64()
    }
}

impl TryFrom<Decimal> for ChargeableAmount {
    type Error = OrderError;

    fn try_from(price: Decimal) -> Result<Self> {
        if price < Self::MINIMUM {
            return Err(OrderError::NotChargeable(price));
        }
        Ok(Self(price))
    }
}

impl fmt::Display for ChargeableAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
