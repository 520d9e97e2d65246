//! serialization support for loans

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::loans::Loan;
use crate::payments::ScheduleSummary;
use crate::period::PeriodSpec;
use crate::types::{LoanId, PaymentLine};

/// serializable view of a loan with its ordered payments
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanView {
    pub id: LoanId,
    pub amount: Money,
    pub interest_rate: Rate,
    pub start_date: NaiveDate,
    pub periodicity: PeriodSpec,
    pub created_at: DateTime<Utc>,
    pub summary: ScheduleSummary,
    pub payments: Vec<PaymentView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentView {
    pub sequence: u32,
    pub date: NaiveDate,
    pub principal: Money,
    pub interest: Money,
    pub pinned: bool,
}

impl From<&PaymentLine> for PaymentView {
    fn from(line: &PaymentLine) -> Self {
        PaymentView {
            sequence: line.sequence,
            date: line.date,
            principal: line.principal_portion,
            interest: line.interest_portion,
            pinned: line.pinned,
        }
    }
}

impl LoanView {
    pub fn from_loan(loan: &Loan) -> Self {
        let terms = loan.terms();

        LoanView {
            id: loan.id(),
            amount: terms.principal,
            interest_rate: terms.annual_rate,
            start_date: terms.start_date,
            periodicity: terms.periodicity,
            created_at: loan.created_at(),
            summary: loan.summary(),
            payments: loan.payments().iter().map(PaymentView::from).collect(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// views for a run of payment lines, e.g. the lines touched by a reduction
pub fn payment_views(lines: &[PaymentLine]) -> Vec<PaymentView> {
    lines.iter().map(PaymentView::from).collect()
}
