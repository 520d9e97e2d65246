use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use log::{info, warn};
use uuid::Uuid;

use crate::config::LoanTerms;
use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};
use crate::events::{Event, EventStore};
use crate::payments::{self, ScheduleSummary};
use crate::types::{LoanId, PaymentLine};

/// A loan and its payment schedule.
///
/// Reductions take `&mut self`, so every read-modify-write cycle on one loan
/// is serialized by the borrow checker; separate loans are independent.
#[derive(Debug)]
pub struct Loan {
    id: LoanId,
    terms: LoanTerms,
    created_at: DateTime<Utc>,
    payments: Vec<PaymentLine>,
    events: EventStore,
}

impl Loan {
    /// Create a loan and generate its schedule.
    ///
    /// The start date may not lie before the provider's current date.
    pub fn originate(terms: LoanTerms, time: &SafeTimeProvider) -> Result<Self> {
        terms.validate()?;

        let now = time.now();
        if terms.start_date < now.date_naive() {
            return Err(ScheduleError::InvalidDate {
                message: format!(
                    "loan start date {} cannot be in the past (today is {})",
                    terms.start_date,
                    now.date_naive()
                ),
            });
        }

        let payments = payments::generate_schedule(&terms)?;
        let id = Uuid::new_v4();

        info!(
            "originated loan {} for {} over {} payments every {}",
            id, terms.principal, terms.payment_count, terms.periodicity
        );

        let mut events = EventStore::new();
        events.emit(Event::LoanOriginated {
            loan_id: id,
            principal: terms.principal,
            payment_count: terms.payment_count,
            first_payment_date: terms.start_date,
            timestamp: now,
        });

        Ok(Self {
            id,
            terms,
            created_at: now,
            payments,
            events,
        })
    }

    /// Rebuild a loan from previously stored parts.
    ///
    /// Payments are sorted by sequence and must form a complete schedule
    /// whose principal portions add up to the loan amount.
    pub fn restore(
        id: LoanId,
        terms: LoanTerms,
        created_at: DateTime<Utc>,
        mut payments: Vec<PaymentLine>,
    ) -> Result<Self> {
        terms.validate()?;
        payments.sort_by_key(|p| p.sequence);

        if payments.len() != terms.payment_count as usize {
            return Err(ScheduleError::InconsistentSchedule {
                message: format!(
                    "expected {} payments, found {}",
                    terms.payment_count,
                    payments.len()
                ),
            });
        }

        let scheduled: Money = payments.iter().map(|p| p.principal_portion).sum();
        if scheduled != terms.principal {
            return Err(ScheduleError::InconsistentSchedule {
                message: format!(
                    "scheduled principal {} does not match loan amount {}",
                    scheduled, terms.principal
                ),
            });
        }

        Ok(Self {
            id,
            terms,
            created_at,
            payments,
            events: EventStore::new(),
        })
    }

    pub fn id(&self) -> LoanId {
        self.id
    }

    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn payments(&self) -> &[PaymentLine] {
        &self.payments
    }

    pub fn payment(&self, sequence: u32) -> Option<&PaymentLine> {
        self.payments.iter().find(|p| p.sequence == sequence)
    }

    /// principal still owed before payment `sequence` falls due
    pub fn outstanding_before(&self, sequence: u32) -> Money {
        payments::balance_before(&self.payments, self.terms.principal, sequence)
    }

    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary::from_lines(&self.payments)
    }

    /// Reduce one payment's principal and recalculate it and every later
    /// payment. Returns the updated lines from `sequence` to the end.
    ///
    /// Nothing is written unless the whole recalculation succeeds.
    pub fn reduce_principal(
        &mut self,
        sequence: u32,
        amount: Money,
        time: &SafeTimeProvider,
    ) -> Result<Vec<PaymentLine>> {
        let updated = match payments::reduce_principal(&self.payments, sequence, amount, &self.terms) {
            Ok(updated) => updated,
            Err(err) => {
                warn!("loan {}: reduction of payment {} by {} rejected: {}", self.id, sequence, amount, err);
                if let ScheduleError::InvalidReduction { reason } = &err {
                    self.events.emit(Event::ReductionRejected {
                        loan_id: self.id,
                        sequence,
                        amount,
                        reason: reason.to_string(),
                        timestamp: time.now(),
                    });
                }
                return Err(err);
            }
        };

        payments::replace_lines(&mut self.payments, updated.clone())?;

        let new_principal = updated[0].principal_portion;
        info!(
            "loan {}: payment {} reduced by {} to {}, {} payments recalculated",
            self.id,
            sequence,
            amount,
            new_principal,
            updated.len()
        );

        self.events.emit(Event::PrincipalReduced {
            loan_id: self.id,
            sequence,
            amount,
            new_principal,
            timestamp: time.now(),
        });
        for line in &updated {
            self.events.emit(Event::PaymentRecalculated {
                loan_id: self.id,
                sequence: line.sequence,
                principal_portion: line.principal_portion,
                interest_portion: line.interest_portion,
            });
        }

        Ok(updated)
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// get json representation of the loan and its payments
    pub fn json(&self) -> String {
        use super::serialization::LoanView;

        LoanView::from_loan(self)
            .to_json_pretty()
            .unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}
