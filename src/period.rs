use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, ScheduleError};

/// calendar unit of a payment cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodUnit {
    Day,
    Week,
    Month,
}

impl PeriodUnit {
    /// unit for a single-character code (`d`, `w`, `m`)
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'd' => Some(PeriodUnit::Day),
            'w' => Some(PeriodUnit::Week),
            'm' => Some(PeriodUnit::Month),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            PeriodUnit::Day => 'd',
            PeriodUnit::Week => 'w',
            PeriodUnit::Month => 'm',
        }
    }

    /// fixed divisor used to turn an annual rate into a per-unit rate
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PeriodUnit::Day => 365,
            PeriodUnit::Week => 52,
            PeriodUnit::Month => 12,
        }
    }
}

/// Payment cadence: `multiplier` units between consecutive payments.
///
/// Parsed from the compact `<integer><unit-code>` form, e.g. `1m`, `2w`,
/// `10d`. The multiplier is always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodSpec {
    multiplier: u32,
    unit: PeriodUnit,
}

impl PeriodSpec {
    pub fn new(multiplier: u32, unit: PeriodUnit) -> Result<Self> {
        if multiplier == 0 {
            return Err(ScheduleError::InvalidPeriodicity {
                input: format!("0{}", unit.code()),
            });
        }
        Ok(Self { multiplier, unit })
    }

    pub fn monthly() -> Self {
        Self {
            multiplier: 1,
            unit: PeriodUnit::Month,
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || ScheduleError::InvalidPeriodicity {
            input: text.to_string(),
        };

        let mut chars = text.chars();
        let code = chars.next_back().ok_or_else(invalid)?;
        let digits = chars.as_str();

        if digits.is_empty() {
            return Err(invalid());
        }

        let unit = PeriodUnit::from_code(code).ok_or_else(invalid)?;

        // no sign, no whitespace, no separators
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let multiplier: u32 = digits.parse().map_err(|_| invalid())?;
        if multiplier == 0 {
            return Err(invalid());
        }

        Ok(Self { multiplier, unit })
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn unit(&self) -> PeriodUnit {
        self.unit
    }
}

impl fmt::Display for PeriodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.multiplier, self.unit.code())
    }
}

impl FromStr for PeriodSpec {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        PeriodSpec::parse(s)
    }
}

impl TryFrom<String> for PeriodSpec {
    type Error = ScheduleError;

    fn try_from(s: String) -> Result<Self> {
        PeriodSpec::parse(&s)
    }
}

impl From<PeriodSpec> for String {
    fn from(p: PeriodSpec) -> Self {
        p.to_string()
    }
}
