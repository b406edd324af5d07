//! # Pricing
//!
//! Weighing, quoting and making change for a load of laundry.
//!
//! ## Intake Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator weighs the bag: "2.5" kg                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Weight::from_kg_str("2.5") ──► 2500 g                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  quote(7000.00 / kg, 2500 g) ──► 17500.00                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  settle(17500.00, paid 20000.00) ──► change 2500.00                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

/// Grams per kilogram.
pub const GRAMS_PER_KG: i64 = 1000;

/// Weight of a load in whole grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(i64);

impl Weight {
    #[inline]
    pub const fn from_grams(grams: i64) -> Self {
        Weight(grams)
    }

    /// Parses a kilogram reading such as `"2"`, `"2.5"` or `"0.750"`.
    ///
    /// A comma is accepted as the decimal separator. Up to three decimal
    /// places (gram precision).
    ///
    /// ```rust
    /// use laundry_core::pricing::Weight;
    ///
    /// assert_eq!(Weight::from_kg_str("2.5").unwrap().grams(), 2500);
    /// assert_eq!(Weight::from_kg_str("0,75").unwrap().grams(), 750);
    /// assert!(Weight::from_kg_str("1.2345").is_err());
    /// ```
    pub fn from_kg_str(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim().replace(',', ".");
        if input.is_empty() {
            return Err(ValidationError::required("weight"));
        }

        let (whole, frac) = match input.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (input.as_str(), ""),
        };

        let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !digits_only(whole) || !digits_only(frac) {
            return Err(ValidationError::invalid("weight", "must be a number of kilograms"));
        }
        if frac.len() > 3 {
            return Err(ValidationError::invalid("weight", "at most three decimal places"));
        }

        let too_heavy = || ValidationError::invalid("weight", "number is too large");
        let kg: i64 = whole.parse().map_err(|_| too_heavy())?;
        let grams_part: i64 = if frac.is_empty() {
            0
        } else {
            format!("{:0<3}", frac).parse().map_err(|_| too_heavy())?
        };

        kg.checked_mul(GRAMS_PER_KG)
            .and_then(|g| g.checked_add(grams_part))
            .map(Weight)
            .ok_or_else(too_heavy)
    }

    #[inline]
    pub const fn grams(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03} kg", self.0 / GRAMS_PER_KG, (self.0 % GRAMS_PER_KG).abs())
    }
}

/// Prices a load: `price_per_kg × kilograms`, rounded half up to the
/// nearest minor unit.
///
/// Fails with `AmountOverflow` when the total does not fit in [`Money`].
pub fn quote(price_per_kg: Money, weight: Weight) -> CoreResult<Money> {
    let raw = price_per_kg.minor() as i128 * weight.grams() as i128;
    let rounded = (raw + (GRAMS_PER_KG as i128 / 2)) / GRAMS_PER_KG as i128;
    i64::try_from(rounded)
        .map(Money::from_minor)
        .map_err(|_| CoreError::AmountOverflow("total"))
}

/// Returns the change due, or `InsufficientPayment` when `paid < total`.
pub fn settle(total: Money, paid: Money) -> CoreResult<Money> {
    if paid < total {
        return Err(CoreError::InsufficientPayment { total, paid });
    }
    paid.checked_sub(total)
        .ok_or(CoreError::AmountOverflow("change"))
}

/// Amounts printed on the intake slip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub price_per_kg: Money,
    pub weight: Weight,
    pub total: Money,
    pub paid: Money,
    pub change: Money,
}

impl Receipt {
    pub fn compute(price_per_kg: Money, weight: Weight, paid: Money) -> CoreResult<Self> {
        let total = quote(price_per_kg, weight)?;
        let change = settle(total, paid)?;
        Ok(Receipt {
            price_per_kg,
            weight,
            total,
            paid,
            change,
        })
    }
}
