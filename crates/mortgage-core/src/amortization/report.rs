//! Plain-text rendering of a schedule and its summary.
//!
//! All amounts are printed fixed-point with two decimal places, rounded half
//! away from zero. The header of every full report states this.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::fmt::Write;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::Table;

use super::engine::{
    build_amortization, AmortizationOutput, PaymentQuote, PaymentRow, SummaryStats,
};
use super::terms::LoanTerms;
use crate::error::MortgageError;
use crate::MortgageResult;

pub const NUMBER_FORMAT_NOTE: &str =
    "Amounts are fixed-point with 2 decimal places, rounded half away from zero.";

const SCHEDULE_HEADERS: [&str; 5] = [
    "Payment",
    "Blended Payment",
    "Interest",
    "Principal",
    "Balance",
];

/// Format an amount with two decimal places.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Keep "-0.00" out of the output.
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };
    format!("{:.2}", rounded)
}

/// Fixed-width table of payment rows.
pub fn render_schedule_table(rows: &[PaymentRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(SCHEDULE_HEADERS);
    for row in rows {
        builder.push_record([
            row.index.to_string(),
            format_amount(row.payment),
            format_amount(row.interest_portion),
            format_amount(row.principal_portion),
            format_amount(row.remaining_balance),
        ]);
    }

    let mut table = Table::from(builder);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()));
    table.to_string()
}

/// The "Additional Information" block.
pub fn render_summary(summary: &SummaryStats) -> String {
    let lines = [
        ("Total Interest Paid", summary.total_interest_paid),
        ("Total Interest and Principal", summary.total_paid),
        (
            "Interest/Principal Ratio",
            summary.interest_to_principal_ratio,
        ),
        (
            "Average Interest Paid per Month",
            summary.average_interest_per_month,
        ),
        (
            "Average Interest Paid per Year",
            summary.average_interest_per_year,
        ),
        ("Amortization in Years", summary.amortization_years),
    ];

    let mut out = String::from("Additional Information:\n");
    for (label, value) in lines {
        let _ = writeln!(out, "{}: {}", label, format_amount(value));
    }
    out
}

/// Short text for a payment quote.
pub fn render_payment_quote(quote: &PaymentQuote) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Periodic Interest Factor: {}",
        quote.periodic_interest_factor.normalize()
    );
    let _ = writeln!(out, "Blended Payment: {}", format_amount(quote.blended_payment));
    let _ = writeln!(out, "Number of Payments: {}", quote.number_of_payments);
    let _ = writeln!(
        out,
        "Total of Payments: {}",
        format_amount(quote.total_of_payments)
    );
    out
}

/// Full report: input echo and number format, the schedule table, then the
/// summary statistics.
pub fn render_report(terms: &LoanTerms) -> MortgageResult<String> {
    let output = build_amortization(terms)?;
    render_amortization_report(terms, &output)
}

/// Full report for an amortization that has already been computed.
pub fn render_amortization_report(
    terms: &LoanTerms,
    output: &AmortizationOutput,
) -> MortgageResult<String> {
    let rate_percent = terms
        .annual_interest_rate
        .checked_mul(dec!(100))
        .ok_or_else(|| {
            MortgageError::NumericOverflow(format!(
                "annual interest rate {} as a percentage",
                terms.annual_interest_rate
            ))
        })?;

    let mut out = String::from("Mortgage Amortization Schedule\n\n");
    let _ = writeln!(out, "Principal: {}", format_amount(terms.principal));
    let _ = writeln!(
        out,
        "Annual Interest Rate: {}%",
        rate_percent.normalize()
    );
    let _ = writeln!(out, "Number of Payments: {}", terms.number_of_payments);
    let _ = writeln!(
        out,
        "Payment Frequency: {} ({} per year)",
        terms.payment_frequency_label(),
        terms.payment_frequency
    );
    let _ = writeln!(
        out,
        "Compounding Frequency: {} ({} per year)",
        terms.compounding_frequency_label(),
        terms.compounding_frequency
    );
    let _ = writeln!(
        out,
        "Periodic Interest Factor: {}",
        output.periodic_interest_factor.normalize()
    );
    let _ = writeln!(out, "{}\n", NUMBER_FORMAT_NOTE);

    out.push_str(&render_schedule_table(&output.schedule));
    out.push_str("\n\n");
    out.push_str(&render_summary(&output.summary));
    Ok(out)
}

/// Validate the terms and produce the full report.
pub fn calculate(terms: &LoanTerms) -> MortgageResult<String> {
    terms.validate()?;
    render_report(terms)
}
