pub mod amortization;
pub mod reduction;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::PaymentLine;

pub use amortization::generate_schedule;
pub use reduction::{balance_before, reduce_principal, replace_lines};

/// totals over a run of payment lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub payment_count: u32,
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_paid: Money,
    pub first_payment_date: Option<NaiveDate>,
    pub last_payment_date: Option<NaiveDate>,
    pub pinned_count: u32,
}

impl ScheduleSummary {
    pub fn from_lines(lines: &[PaymentLine]) -> Self {
        let total_principal: Money = lines.iter().map(|l| l.principal_portion).sum();
        let total_interest: Money = lines.iter().map(|l| l.interest_portion).sum();

        Self {
            payment_count: lines.len() as u32,
            total_principal,
            total_interest,
            total_paid: total_principal + total_interest,
            first_payment_date: lines.iter().map(|l| l.date).min(),
            last_payment_date: lines.iter().map(|l| l.date).max(),
            pinned_count: lines.iter().filter(|l| l.pinned).count() as u32,
        }
    }
}
