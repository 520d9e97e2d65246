use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};

/// Equated installment that amortizes `principal` over `count` periods.
///
/// `emi = r * P / (1 - (1 + r)^-n)`, or `P / n` when the rate is zero,
/// rounded half-up to cents.
pub fn emi(principal: Money, rate_per_period: Rate, count: u32) -> Result<Money> {
    if count == 0 {
        return Err(ScheduleError::CalculationError {
            message: "installment count must be at least one".to_string(),
        });
    }

    if rate_per_period.is_negative() {
        return Err(ScheduleError::CalculationError {
            message: format!("negative rate per period: {}", rate_per_period.as_decimal()),
        });
    }

    let p = principal.as_decimal();

    if rate_per_period.is_zero() {
        return Ok(Money::from_decimal(p / Decimal::from(count)));
    }

    let r = rate_per_period.as_decimal();

    // once (1 + r)^n leaves the decimal range its reciprocal is below the
    // smallest representable step, so the discount term is zero
    let discount = match growth_factor(r, count) {
        Some(growth) => Decimal::ONE / growth,
        None => Decimal::ZERO,
    };

    let denominator = Decimal::ONE - discount;
    let overflow = || ScheduleError::CalculationError {
        message: format!("installment for {principal} at {r} over {count} periods overflows"),
    };

    let numerator = r.checked_mul(p).ok_or_else(overflow)?;
    let installment = numerator.checked_div(denominator).ok_or_else(overflow)?;

    Ok(Money::from_decimal(installment))
}

/// (1 + rate)^periods by squaring, `None` on overflow
fn growth_factor(rate: Decimal, periods: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut base = Decimal::ONE + rate;
    let mut n = periods;

    while n > 0 {
        if n & 1 == 1 {
            result = result.checked_mul(base)?;
        }
        n >>= 1;
        if n > 0 {
            base = base.checked_mul(base)?;
        }
    }

    Some(result)
}
