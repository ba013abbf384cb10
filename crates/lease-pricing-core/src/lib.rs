//! Rent-to-own vehicle lease pricing.
//!
//! Turns a set of pricing parameters and candidate down-payment (PV) amounts
//! into buyout totals, daily rental rates for the over-15 and under-15 day
//! tiers, a market-consistency check, and a client-facing quote message.
//! Every calculation is a pure function of its inputs.

pub mod error;
pub mod rounding;
pub mod types;

#[cfg(feature = "pricing")]
pub mod pricing;

#[cfg(feature = "quote")]
pub mod quote;

pub use error::LeasePricingError;
pub use types::*;

/// Standard result type for all lease-pricing operations
pub type LeasePricingResult<T> = Result<T, LeasePricingError>;
