//! Market-consistency classification of a buyout against the car's reference price.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Percent;

const GOOD_LOWER: Decimal = dec!(90);
const GOOD_UPPER: Decimal = dec!(110);
const WARNING_LOWER: Decimal = dec!(80);
const WARNING_UPPER: Decimal = dec!(120);

/// How plausible a buyout is relative to the reference car price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketStatus {
    /// Buyout within 90%..=110% of the car price
    Good,
    /// Buyout within 80%..90% or above 110% up to 120%
    Warning,
    /// Anything else, including a missing car price
    Bad,
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MarketStatus::Good => "good",
            MarketStatus::Warning => "warning",
            MarketStatus::Bad => "bad",
        };
        f.write_str(label)
    }
}

/// Classify a buyout expressed as a percentage of the car price.
///
/// Bands are closed as follows: `[90, 110]` good, `[80, 90)` and `(110, 120]`
/// warning, everything else bad.
pub fn classify(percent: Percent) -> MarketStatus {
    if (GOOD_LOWER..=GOOD_UPPER).contains(&percent) {
        MarketStatus::Good
    } else if (WARNING_LOWER..GOOD_LOWER).contains(&percent)
        || (percent > GOOD_UPPER && percent <= WARNING_UPPER)
    {
        MarketStatus::Warning
    } else {
        MarketStatus::Bad
    }
}
