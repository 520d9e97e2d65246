pub mod loan;
pub mod serialization;

pub use loan::Loan;
pub use serialization::{payment_views, LoanView, PaymentView};
