use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::LoanId;

/// all events that can be emitted by a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    LoanOriginated {
        loan_id: LoanId,
        principal: Money,
        payment_count: u32,
        first_payment_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },
    PrincipalReduced {
        loan_id: LoanId,
        sequence: u32,
        amount: Money,
        new_principal: Money,
        timestamp: DateTime<Utc>,
    },
    PaymentRecalculated {
        loan_id: LoanId,
        sequence: u32,
        principal_portion: Money,
        interest_portion: Money,
    },
    ReductionRejected {
        loan_id: LoanId,
        sequence: u32,
        amount: Money,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
