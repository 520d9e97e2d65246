use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::period::PeriodSpec;

/// immutable input to schedule generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// annual rate as a fraction (0.12 for 12%)
    pub annual_rate: Rate,
    pub start_date: NaiveDate,
    pub payment_count: u32,
    pub periodicity: PeriodSpec,
}

impl LoanTerms {
    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    /// check principal > 0, rate >= 0 and at least one payment
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(ScheduleError::InvalidTerms {
                message: format!("principal must be positive, got {}", self.principal),
            });
        }

        if self.annual_rate.is_negative() {
            return Err(ScheduleError::InvalidTerms {
                message: format!("interest rate must not be negative, got {}", self.annual_rate),
            });
        }

        if self.payment_count == 0 {
            return Err(ScheduleError::InvalidTerms {
                message: "number of payments must be at least one".to_string(),
            });
        }

        Ok(())
    }

    /// load and validate terms from a json document
    pub fn from_json(json: &str) -> Result<Self> {
        let terms: LoanTerms = serde_json::from_str(json)?;
        terms.validate()?;
        Ok(terms)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// builder for loan terms
#[derive(Debug, Default)]
pub struct LoanTermsBuilder {
    principal: Option<Money>,
    annual_rate: Option<Rate>,
    start_date: Option<NaiveDate>,
    payment_count: Option<u32>,
    periodicity: Option<String>,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn annual_rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn payment_count(mut self, count: u32) -> Self {
        self.payment_count = Some(count);
        self
    }

    /// compact cadence such as `1m`, `2w` or `10d`; monthly when unset
    pub fn periodicity(mut self, periodicity: impl Into<String>) -> Self {
        self.periodicity = Some(periodicity.into());
        self
    }

    pub fn build(self) -> Result<LoanTerms> {
        let principal = self.principal.ok_or(ScheduleError::InvalidTerms {
            message: "principal required".to_string(),
        })?;

        let annual_rate = self.annual_rate.ok_or(ScheduleError::InvalidTerms {
            message: "interest rate required".to_string(),
        })?;

        let start_date = self.start_date.ok_or(ScheduleError::InvalidTerms {
            message: "start date required".to_string(),
        })?;

        let payment_count = self.payment_count.ok_or(ScheduleError::InvalidTerms {
            message: "number of payments required".to_string(),
        })?;

        let periodicity = match self.periodicity {
            Some(text) => PeriodSpec::parse(&text)?,
            None => PeriodSpec::monthly(),
        };

        let terms = LoanTerms {
            principal,
            annual_rate,
            start_date,
            payment_count,
            periodicity,
        };
        terms.validate()?;

        Ok(terms)
    }
}
