use rust_decimal::Decimal;

use crate::decimal::{Rate, RATE_DP};
use crate::period::PeriodSpec;

/// Convert an annual rate into the rate charged per payment period.
///
/// Uses the fixed 365/52/12 divisors of the period unit, not elapsed days,
/// and rounds half-up to 8 decimal places.
pub fn rate_per_period(annual_rate: Rate, period: PeriodSpec) -> Rate {
    let year_fraction = Decimal::ONE / Decimal::from(period.unit().periods_per_year())
        * Decimal::from(period.multiplier());

    Rate::from_decimal(annual_rate.as_decimal() * year_fraction).round_dp(RATE_DP)
}
