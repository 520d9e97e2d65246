use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("invalid periodicity: {input:?}")]
    InvalidPeriodicity {
        input: String,
    },

    #[error("invalid reduction: {reason}")]
    InvalidReduction {
        reason: ReductionRejection,
    },

    #[error("payment not found: sequence {sequence}")]
    PaymentNotFound {
        sequence: u32,
    },

    #[error("inconsistent schedule: {message}")]
    InconsistentSchedule {
        message: String,
    },

    #[error("invalid loan terms: {message}")]
    InvalidTerms {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("serialization error: {message}")]
    Serialization {
        message: String,
    },
}

/// why a principal reduction was refused
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReductionRejection {
    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount {
        amount: Money,
    },

    #[error("amount {amount} must be less than the payment principal {principal}")]
    ExceedsPrincipal {
        amount: Money,
        principal: Money,
    },

    #[error("no unpinned payment left to absorb the remaining balance {remaining}")]
    UnclosedBalance {
        remaining: Money,
    },

    #[error("payment {sequence} would carry a negative principal {principal}")]
    NegativePrincipal {
        sequence: u32,
        principal: Money,
    },
}

impl From<ReductionRejection> for ScheduleError {
    fn from(reason: ReductionRejection) -> Self {
        ScheduleError::InvalidReduction { reason }
    }
}

impl From<serde_json::Error> for ScheduleError {
    fn from(e: serde_json::Error) -> Self {
        ScheduleError::Serialization {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScheduleError::InvalidPeriodicity {
            input: "0m".to_string(),
        };
        assert_eq!(err.to_string(), "invalid periodicity: \"0m\"");

        let err: ScheduleError = ReductionRejection::ExceedsPrincipal {
            amount: Money::from_major(300),
            principal: Money::from_major(250),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid reduction: amount 300.00 must be less than the payment principal 250.00"
        );
    }
}
