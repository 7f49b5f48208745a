//! Fixed-payment amortization: loan terms, the level-payment engine and the
//! text report handed to presentation layers.

pub mod engine;
pub mod report;
pub mod terms;

pub use engine::{
    amortize, compute_blended_payment, compute_periodic_interest_factor, compute_summary,
    generate_schedule, quote_payment, schedule, summarize, AmortizationOutput, PaymentQuote,
    PaymentRow, Schedule, SummaryStats,
};
pub use report::{calculate, render_amortization_report, render_report};
pub use terms::{CompoundingFrequency, LoanTerms, PaymentFrequency};
