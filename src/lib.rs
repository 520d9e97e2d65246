pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod loans;
pub mod payments;
pub mod period;
pub mod types;

// re-export key types
pub use config::{LoanTerms, LoanTermsBuilder};
pub use decimal::{Money, Rate};
pub use errors::{ReductionRejection, Result, ScheduleError};
pub use events::{Event, EventStore};
pub use loans::{Loan, LoanView, PaymentView};
pub use payments::{generate_schedule, reduce_principal, replace_lines, ScheduleSummary};
pub use period::{PeriodSpec, PeriodUnit};
pub use types::{LoanId, PaymentLine};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
