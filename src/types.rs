use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// one scheduled installment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLine {
    /// 1-based position in the schedule
    pub sequence: u32,
    pub date: NaiveDate,
    pub principal_portion: Money,
    pub interest_portion: Money,
    /// principal was fixed by a manual reduction and is never recomputed
    pub pinned: bool,
}

impl PaymentLine {
    pub fn new(sequence: u32, date: NaiveDate, principal_portion: Money, interest_portion: Money) -> Self {
        Self {
            sequence,
            date,
            principal_portion,
            interest_portion,
            pinned: false,
        }
    }

    pub fn payment_amount(&self) -> Money {
        self.principal_portion + self.interest_portion
    }
}
