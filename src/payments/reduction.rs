use log::debug;

use crate::config::LoanTerms;
use crate::decimal::Money;
use crate::errors::{ReductionRejection, Result, ScheduleError};
use crate::interest::{emi, rate_per_period};
use crate::payments::amortization::scheduled_split;
use crate::types::PaymentLine;

/// Reduce the principal of one payment and re-derive the rest of the schedule.
///
/// The target line loses `reduce_amount` of principal and becomes pinned.
/// A fresh installment is computed from the balance outstanding before the
/// target over the remaining number of lines, then every line from the
/// target onwards is walked in order: interest is refreshed on all of them,
/// pinned lines keep their principal, the last line repays the balance and
/// the others pay `emi - interest`.
///
/// Works on copies. The returned lines cover `target_sequence..=end` and the
/// input slice is never touched, so a failure leaves nothing half-applied.
pub fn reduce_principal(
    lines: &[PaymentLine],
    target_sequence: u32,
    reduce_amount: Money,
    terms: &LoanTerms,
) -> Result<Vec<PaymentLine>> {
    check_sequences(lines)?;

    let target = lines
        .iter()
        .find(|l| l.sequence == target_sequence)
        .ok_or(ScheduleError::PaymentNotFound {
            sequence: target_sequence,
        })?;

    if !reduce_amount.is_positive() {
        return Err(ReductionRejection::NonPositiveAmount {
            amount: reduce_amount,
        }
        .into());
    }

    if reduce_amount >= target.principal_portion {
        return Err(ReductionRejection::ExceedsPrincipal {
            amount: reduce_amount,
            principal: target.principal_portion,
        }
        .into());
    }

    let rate = rate_per_period(terms.annual_rate, terms.periodicity);
    let balance_before = balance_before(lines, terms.principal, target_sequence);

    let mut affected: Vec<PaymentLine> = lines
        .iter()
        .filter(|l| l.sequence >= target_sequence)
        .cloned()
        .collect();

    // target is the first affected line
    affected[0].principal_portion -= reduce_amount;
    affected[0].pinned = true;

    let remaining_count = affected.len() as u32;
    let installment = emi(balance_before, rate, remaining_count)?;

    debug!(
        "reducing payment {} by {}: balance {} over {} payments, new installment {}",
        target_sequence, reduce_amount, balance_before, remaining_count, installment
    );

    let last_index = affected.len() - 1;
    let mut balance = balance_before;

    for (index, line) in affected.iter_mut().enumerate() {
        let interest = balance * rate;

        let principal = if line.pinned {
            line.principal_portion
        } else if index == last_index {
            balance
        } else {
            scheduled_split(installment, balance, rate).0
        };

        if principal.is_negative() {
            return Err(ReductionRejection::NegativePrincipal {
                sequence: line.sequence,
                principal,
            }
            .into());
        }

        line.principal_portion = principal;
        line.interest_portion = interest;
        balance -= principal;
    }

    if !balance.is_zero() {
        return Err(ReductionRejection::UnclosedBalance { remaining: balance }.into());
    }

    Ok(affected)
}

/// Loan principal minus everything scheduled before `sequence`.
pub fn balance_before(lines: &[PaymentLine], principal: Money, sequence: u32) -> Money {
    let repaid: Money = lines
        .iter()
        .filter(|l| l.sequence < sequence)
        .map(|l| l.principal_portion)
        .sum();
    principal - repaid
}

/// Commit recomputed lines into a full schedule, replacing by sequence.
///
/// All sequences are resolved before anything is written.
pub fn replace_lines(schedule: &mut [PaymentLine], updated: Vec<PaymentLine>) -> Result<()> {
    let mut positions = Vec::with_capacity(updated.len());
    for line in &updated {
        let position = schedule
            .iter()
            .position(|l| l.sequence == line.sequence)
            .ok_or(ScheduleError::PaymentNotFound {
                sequence: line.sequence,
            })?;
        positions.push(position);
    }

    for (position, line) in positions.into_iter().zip(updated) {
        schedule[position] = line;
    }

    Ok(())
}

/// sequences must run 1..=n in order
fn check_sequences(lines: &[PaymentLine]) -> Result<()> {
    for (index, line) in lines.iter().enumerate() {
        let expected = index as u32 + 1;
        if line.sequence != expected {
            return Err(ScheduleError::InconsistentSchedule {
                message: format!("expected payment {expected}, found {}", line.sequence),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::payments::generate_schedule;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use test_log::test;

    fn money(s: &str) -> Money {
        Money::from_str_exact(s).unwrap()
    }

    fn monthly_terms() -> LoanTerms {
        LoanTerms::builder()
            .principal(money("1000.00"))
            .annual_rate(Rate::from_decimal(dec!(0.12)))
            .start_date(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap())
            .payment_count(4)
            .periodicity("1m")
            .build()
            .unwrap()
    }

    fn portions(lines: &[PaymentLine]) -> Vec<(u32, Money, Money, bool)> {
        lines
            .iter()
            .map(|l| (l.sequence, l.principal_portion, l.interest_portion, l.pinned))
            .collect()
    }

    fn total_principal(lines: &[PaymentLine]) -> Money {
        lines.iter().map(|l| l.principal_portion).sum()
    }

    #[test]
    fn test_reduce_second_payment() {
        let terms = monthly_terms();
        let schedule = generate_schedule(&terms).unwrap();

        let updated = reduce_principal(&schedule, 2, money("50.00"), &terms).unwrap();

        assert_eq!(
            portions(&updated),
            vec![
                (2, money("198.74"), money("7.54"), true),
                (3, money("250.73"), money("5.55"), false),
                (4, money("304.25"), money("3.04"), false),
            ]
        );

        // dates are carried over untouched
        assert_eq!(updated[0].date, schedule[1].date);
        assert_eq!(updated[2].date, schedule[3].date);
    }

    #[test]
    fn test_reduction_keeps_principal_sum() {
        let terms = monthly_terms();
        let mut schedule = generate_schedule(&terms).unwrap();

        let updated = reduce_principal(&schedule, 2, money("50.00"), &terms).unwrap();
        replace_lines(&mut schedule, updated).unwrap();

        assert_eq!(total_principal(&schedule), money("1000.00"));
        assert_eq!(schedule[0].principal_portion, money("246.28"));
    }

    #[test]
    fn test_pinned_lines_survive_later_reductions() {
        let terms = monthly_terms();
        let mut schedule = generate_schedule(&terms).unwrap();

        let updated = reduce_principal(&schedule, 2, money("50.00"), &terms).unwrap();
        replace_lines(&mut schedule, updated).unwrap();

        let updated = reduce_principal(&schedule, 3, money("20.00"), &terms).unwrap();
        assert_eq!(
            portions(&updated),
            vec![
                (3, money("230.73"), money("5.55"), true),
                (4, money("324.25"), money("3.24"), false),
            ]
        );
        replace_lines(&mut schedule, updated).unwrap();

        assert_eq!(schedule[1].principal_portion, money("198.74"));
        assert!(schedule[1].pinned);
        assert_eq!(total_principal(&schedule), money("1000.00"));
    }

    #[test]
    fn test_earlier_reduction_respects_later_pin() {
        let terms = monthly_terms();
        let mut schedule = generate_schedule(&terms).unwrap();

        let updated = reduce_principal(&schedule, 3, money("30.00"), &terms).unwrap();
        replace_lines(&mut schedule, updated).unwrap();
        let pinned_principal = schedule[2].principal_portion;

        let updated = reduce_principal(&schedule, 1, money("40.00"), &terms).unwrap();
        replace_lines(&mut schedule, updated).unwrap();

        assert_eq!(schedule[2].principal_portion, pinned_principal);
        assert!(schedule[0].pinned && schedule[2].pinned && !schedule[3].pinned);
        assert_eq!(total_principal(&schedule), money("1000.00"));
    }

    #[test]
    fn test_reduce_first_payment() {
        let terms = monthly_terms();
        let schedule = generate_schedule(&terms).unwrap();

        let updated = reduce_principal(&schedule, 1, money("100.00"), &terms).unwrap();

        assert_eq!(
            portions(&updated),
            vec![
                (1, money("146.28"), money("10.00"), true),
                (2, money("247.74"), money("8.54"), false),
                (3, money("250.22"), money("6.06"), false),
                (4, money("355.76"), money("3.56"), false),
            ]
        );
    }

    #[test]
    fn test_full_principal_reduction_is_rejected() {
        let terms = monthly_terms();
        let schedule = generate_schedule(&terms).unwrap();
        let before = schedule.clone();

        let err = reduce_principal(&schedule, 2, money("248.74"), &terms).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidReduction {
                reason: ReductionRejection::ExceedsPrincipal {
                    amount: money("248.74"),
                    principal: money("248.74"),
                }
            }
        );

        assert!(reduce_principal(&schedule, 2, money("500.00"), &terms).is_err());
        assert_eq!(schedule, before);
    }

    #[test]
    fn test_non_positive_reduction_is_rejected() {
        let terms = monthly_terms();
        let schedule = generate_schedule(&terms).unwrap();

        for amount in [Money::ZERO, money("-1.00")] {
            let err = reduce_principal(&schedule, 2, amount, &terms).unwrap_err();
            assert!(matches!(
                err,
                ScheduleError::InvalidReduction {
                    reason: ReductionRejection::NonPositiveAmount { .. }
                }
            ));
        }
    }

    #[test]
    fn test_unknown_payment() {
        let terms = monthly_terms();
        let schedule = generate_schedule(&terms).unwrap();

        let err = reduce_principal(&schedule, 9, money("1.00"), &terms).unwrap_err();
        assert_eq!(err, ScheduleError::PaymentNotFound { sequence: 9 });
    }

    #[test]
    fn test_reducing_last_payment_cannot_close() {
        let terms = monthly_terms();
        let schedule = generate_schedule(&terms).unwrap();

        let err = reduce_principal(&schedule, 4, money("10.00"), &terms).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidReduction {
                reason: ReductionRejection::UnclosedBalance {
                    remaining: money("10.00")
                }
            }
        );
    }

    #[test]
    fn test_out_of_order_schedule_is_rejected() {
        let terms = monthly_terms();
        let mut schedule = generate_schedule(&terms).unwrap();
        schedule.swap(1, 2);

        let err = reduce_principal(&schedule, 2, money("1.00"), &terms).unwrap_err();
        assert!(matches!(err, ScheduleError::InconsistentSchedule { .. }));
    }

    #[test]
    fn test_balance_before() {
        let terms = monthly_terms();
        let schedule = generate_schedule(&terms).unwrap();

        assert_eq!(balance_before(&schedule, terms.principal, 1), money("1000.00"));
        assert_eq!(balance_before(&schedule, terms.principal, 3), money("505.98"));
    }

    #[test]
    fn test_replace_lines_is_all_or_nothing() {
        let terms = monthly_terms();
        let mut schedule = generate_schedule(&terms).unwrap();
        let before = schedule.clone();

        let mut bogus = schedule[3].clone();
        bogus.sequence = 7;
        let mut changed = schedule[2].clone();
        changed.principal_portion = Money::ZERO;

        let err = replace_lines(&mut schedule, vec![changed, bogus]).unwrap_err();
        assert_eq!(err, ScheduleError::PaymentNotFound { sequence: 7 });
        assert_eq!(schedule, before);
    }
}
