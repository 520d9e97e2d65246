use log::debug;

use crate::calendar::next_date;
use crate::config::LoanTerms;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::{emi, rate_per_period};
use crate::types::PaymentLine;

/// Generate the declining-balance schedule for a new loan.
///
/// Every line pays `emi - interest` of principal except the last, which takes
/// the exact remaining balance so the principal portions sum to the loan
/// amount. Rounding drift lands in the last line's interest.
pub fn generate_schedule(terms: &LoanTerms) -> Result<Vec<PaymentLine>> {
    terms.validate()?;

    let period = terms.periodicity;
    let rate = rate_per_period(terms.annual_rate, period);
    let installment = emi(terms.principal, rate, terms.payment_count)?;

    debug!(
        "generating {} payments of {} every {} at {} per period",
        terms.payment_count,
        installment,
        period,
        rate.as_decimal()
    );

    let mut payments = Vec::with_capacity(terms.payment_count as usize);
    let mut balance = terms.principal;
    let mut payment_date = terms.start_date;

    for sequence in 1..=terms.payment_count {
        let is_last = sequence == terms.payment_count;

        let (principal_portion, interest_portion) = if is_last {
            closing_split(installment, balance, rate)
        } else {
            scheduled_split(installment, balance, rate)
        };

        payments.push(PaymentLine::new(
            sequence,
            payment_date,
            principal_portion,
            interest_portion,
        ));

        balance -= principal_portion;

        if !is_last {
            payment_date = next_date(payment_date, period)?;
        }
    }

    Ok(payments)
}

/// Regular line: interest on the balance, the rest of the installment to
/// principal. Principal never exceeds the balance nor drops below zero.
pub(crate) fn scheduled_split(installment: Money, balance: Money, rate: Rate) -> (Money, Money) {
    let interest = balance * rate;
    let principal = (installment - interest).min(balance).max(Money::ZERO);
    (principal, interest)
}

/// Final line: repay the balance exactly, interest is what is left of the
/// installment. Never negative, and always zero on an interest-free loan.
pub(crate) fn closing_split(installment: Money, balance: Money, rate: Rate) -> (Money, Money) {
    if rate.is_zero() {
        return (balance, Money::ZERO);
    }
    let interest = (installment - balance).max(Money::ZERO);
    (balance, interest)
}
