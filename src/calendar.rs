use chrono::{Days, Months, NaiveDate};

use crate::errors::{Result, ScheduleError};
use crate::period::{PeriodSpec, PeriodUnit};

/// Advance `date` by `times` repetitions of `period`.
///
/// Month steps clamp to the last valid day of the target month, so
/// 2027-01-31 plus one month is 2027-02-28.
pub fn advance(date: NaiveDate, period: PeriodSpec, times: u32) -> Result<NaiveDate> {
    let out_of_range = || ScheduleError::InvalidDate {
        message: format!("{date} advanced by {times} x {period} is out of range"),
    };

    let steps = period.multiplier().checked_mul(times).ok_or_else(out_of_range)?;

    let next = match period.unit() {
        PeriodUnit::Day => date.checked_add_days(Days::new(u64::from(steps))),
        PeriodUnit::Week => date.checked_add_days(Days::new(u64::from(steps) * 7)),
        PeriodUnit::Month => date.checked_add_months(Months::new(steps)),
    };

    next.ok_or_else(out_of_range)
}

/// next payment date after `date`
pub fn next_date(date: NaiveDate, period: PeriodSpec) -> Result<NaiveDate> {
    advance(date, period, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(text: &str) -> PeriodSpec {
        PeriodSpec::parse(text).unwrap()
    }

    #[test]
    fn test_day_and_week_steps() {
        let start = ymd(2027, 1, 1);
        assert_eq!(next_date(start, period("1d")).unwrap(), ymd(2027, 1, 2));
        assert_eq!(next_date(start, period("10d")).unwrap(), ymd(2027, 1, 11));
        assert_eq!(next_date(start, period("2w")).unwrap(), ymd(2027, 1, 15));
        assert_eq!(advance(start, period("1w"), 3).unwrap(), ymd(2027, 1, 22));
        assert_eq!(advance(start, period("5d"), 0).unwrap(), start);
    }

    #[test]
    fn test_month_steps_clamp_to_month_end() {
        assert_eq!(next_date(ymd(2027, 1, 31), period("1m")).unwrap(), ymd(2027, 2, 28));
        assert_eq!(next_date(ymd(2028, 1, 31), period("1m")).unwrap(), ymd(2028, 2, 29));
        assert_eq!(next_date(ymd(2027, 3, 31), period("1m")).unwrap(), ymd(2027, 4, 30));
        assert_eq!(next_date(ymd(2027, 11, 30), period("3m")).unwrap(), ymd(2028, 2, 29));
        assert_eq!(advance(ymd(2027, 1, 15), period("1m"), 12).unwrap(), ymd(2028, 1, 15));
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let err = next_date(NaiveDate::MAX, period("1d")).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidDate { .. }));

        let err = advance(ymd(2027, 1, 1), period("4000000000d"), 2).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidDate { .. }));
    }
}
