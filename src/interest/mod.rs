pub mod installment;
pub mod rate;

pub use installment::emi;
pub use rate::rate_per_period;
