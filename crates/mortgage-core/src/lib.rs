pub mod amortization;
pub mod error;
pub mod math;
pub mod time_value;
pub mod types;

pub use amortization::{
    amortize, calculate, compute_blended_payment, compute_periodic_interest_factor,
    compute_summary, generate_schedule, quote_payment, render_amortization_report, render_report,
    schedule, summarize,
    AmortizationOutput, CompoundingFrequency, LoanTerms, PaymentFrequency, PaymentQuote,
    PaymentRow, Schedule, SummaryStats,
};
pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
