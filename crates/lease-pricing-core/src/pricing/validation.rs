//! Optional strict checks on a parameter set.
//!
//! The engine itself never validates; callers that want to reject degenerate
//! inputs up front run these checks before pricing.

use rust_decimal::Decimal;

use super::parameters::PricingParameters;
use crate::error::LeasePricingError;
use crate::LeasePricingResult;

pub fn validate_parameters(params: &PricingParameters) -> LeasePricingResult<()> {
    if params.term_months == 0 {
        return Err(LeasePricingError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be greater than zero".into(),
        });
    }
    if params.days_per_month <= Decimal::ZERO {
        return Err(LeasePricingError::InvalidInput {
            field: "days_per_month".into(),
            reason: "Days per month must be positive".into(),
        });
    }
    if params.rate_at_zero <= Decimal::ZERO {
        return Err(LeasePricingError::InvalidInput {
            field: "rate_at_zero".into(),
            reason: "Base daily rate must be positive".into(),
        });
    }
    if params.car_price < Decimal::ZERO {
        return Err(LeasePricingError::InvalidInput {
            field: "car_price".into(),
            reason: "Car price cannot be negative".into(),
        });
    }
    Ok(())
}
