//! Level-payment amortization engine.
//!
//! Every operation is a pure function of [`LoanTerms`]: it re-validates the
//! terms, derives the periodic interest factor and blended payment, and
//! builds whatever view was asked for. Nothing is cached between calls.

use log::{debug, trace};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use std::time::Instant;

use super::terms::LoanTerms;
use crate::error::MortgageError;
use crate::time_value::{effective_periodic_rate, level_payment};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Balances smaller than this in magnitude are snapped to exactly zero.
const BALANCE_EPSILON: Decimal = dec!(0.01);

const MONTHS_PER_YEAR: Decimal = dec!(12);

const STANDARD_PAYMENT_FREQUENCIES: [u32; 3] = [12, 26, 52];
const STANDARD_COMPOUNDING_FREQUENCIES: [u32; 5] = [1, 2, 4, 12, 365];

const LONG_HORIZON_YEARS: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One scheduled payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRow {
    /// 1-based payment number.
    pub index: u32,
    pub payment: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    /// Balance after this payment, snapped to zero below one cent.
    pub remaining_balance: Money,
}

/// Aggregate statistics over the life of the loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_interest_paid: Money,
    pub total_paid: Money,
    pub interest_to_principal_ratio: Decimal,
    /// May be fractional when payments do not fill whole years.
    pub amortization_years: Years,
    pub average_interest_per_year: Money,
    pub average_interest_per_month: Money,
}

/// The level payment and the rate it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentQuote {
    pub periodic_interest_factor: Rate,
    pub blended_payment: Money,
    pub number_of_payments: u32,
    pub total_of_payments: Money,
}

/// Full amortization: derived rate and payment, every row, and the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub periodic_interest_factor: Rate,
    pub blended_payment: Money,
    pub schedule: Vec<PaymentRow>,
    pub summary: SummaryStats,
}

// ---------------------------------------------------------------------------
// Schedule iterator
// ---------------------------------------------------------------------------

/// Lazily generated payment rows. Clone it to replay from the current row;
/// call [`schedule`] again to restart from the first.
#[derive(Debug, Clone)]
pub struct Schedule {
    rate: Rate,
    payment: Money,
    balance: Money,
    emitted: u32,
    number_of_payments: u32,
}

impl Schedule {
    fn new(rate: Rate, payment: Money, terms: &LoanTerms) -> Self {
        Self {
            rate,
            payment,
            balance: terms.principal,
            emitted: 0,
            number_of_payments: terms.number_of_payments,
        }
    }

    pub fn periodic_interest_factor(&self) -> Rate {
        self.rate
    }

    pub fn blended_payment(&self) -> Money {
        self.payment
    }
}

impl Iterator for Schedule {
    type Item = PaymentRow;

    fn next(&mut self) -> Option<PaymentRow> {
        if self.emitted >= self.number_of_payments {
            return None;
        }
        self.emitted += 1;

        // `schedule` checked that the payments total fits, which bounds every row.
        let interest_portion = self.balance.checked_mul(self.rate)?;
        let principal_portion = self.payment.checked_sub(interest_portion)?;
        self.balance = self.balance.checked_sub(principal_portion)?;
        if self.balance.abs() < BALANCE_EPSILON {
            self.balance = Decimal::ZERO;
        }

        trace!(
            "payment {}: interest {}, principal {}, balance {}",
            self.emitted,
            interest_portion,
            principal_portion,
            self.balance
        );

        Some(PaymentRow {
            index: self.emitted,
            payment: self.payment,
            interest_portion,
            principal_portion,
            remaining_balance: self.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.number_of_payments - self.emitted) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Schedule {}

impl FusedIterator for Schedule {}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Effective interest rate charged per payment period.
pub fn compute_periodic_interest_factor(terms: &LoanTerms) -> MortgageResult<Rate> {
    terms.validate()?;
    let factor = effective_periodic_rate(
        terms.annual_interest_rate,
        terms.compounding_frequency,
        terms.payment_frequency,
    )?;
    debug!(
        "periodic interest factor {} ({} compounding, {} payments per year)",
        factor, terms.compounding_frequency, terms.payment_frequency
    );
    Ok(factor)
}

/// Constant payment that retires the principal over the schedule.
pub fn compute_blended_payment(terms: &LoanTerms) -> MortgageResult<Money> {
    let factor = compute_periodic_interest_factor(terms)?;
    blended_payment_at(terms, factor)
}

/// Lazy row-by-row schedule.
pub fn schedule(terms: &LoanTerms) -> MortgageResult<Schedule> {
    let factor = compute_periodic_interest_factor(terms)?;
    let payment = blended_payment_at(terms, factor)?;
    total_of_payments(terms, payment)?;
    Ok(Schedule::new(factor, payment, terms))
}

/// Every payment row, in order.
pub fn generate_schedule(terms: &LoanTerms) -> MortgageResult<Vec<PaymentRow>> {
    Ok(schedule(terms)?.collect())
}

/// Aggregate statistics for the loan.
pub fn compute_summary(terms: &LoanTerms) -> MortgageResult<SummaryStats> {
    let payment = compute_blended_payment(terms)?;
    summary_for(terms, payment)
}

/// Blended payment wrapped in the standard computation envelope.
pub fn quote_payment(terms: &LoanTerms) -> MortgageResult<ComputationOutput<PaymentQuote>> {
    let start = Instant::now();

    let factor = compute_periodic_interest_factor(terms)?;
    let payment = blended_payment_at(terms, factor)?;
    let total_of_payments = total_of_payments(terms, payment)?;

    let output = PaymentQuote {
        periodic_interest_factor: factor,
        blended_payment: payment,
        number_of_payments: terms.number_of_payments,
        total_of_payments,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level (annuity) payment at the effective periodic rate",
        terms,
        collect_warnings(terms),
        elapsed,
        output,
    ))
}

/// Summary statistics wrapped in the standard computation envelope.
pub fn summarize(terms: &LoanTerms) -> MortgageResult<ComputationOutput<SummaryStats>> {
    let start = Instant::now();
    let summary = compute_summary(terms)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization summary",
        terms,
        collect_warnings(terms),
        elapsed,
        summary,
    ))
}

/// Full amortization wrapped in the standard computation envelope.
pub fn amortize(terms: &LoanTerms) -> MortgageResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let output = build_amortization(terms)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization with compounding-to-payment rate conversion",
        terms,
        collect_warnings(terms),
        elapsed,
        output,
    ))
}

/// Factor, payment, rows and summary from a single derivation.
pub(crate) fn build_amortization(terms: &LoanTerms) -> MortgageResult<AmortizationOutput> {
    let schedule = schedule(terms)?;
    let factor = schedule.periodic_interest_factor();
    let payment = schedule.blended_payment();
    let summary = summary_for(terms, payment)?;

    Ok(AmortizationOutput {
        periodic_interest_factor: factor,
        blended_payment: payment,
        schedule: schedule.collect(),
        summary,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn blended_payment_at(terms: &LoanTerms, factor: Rate) -> MortgageResult<Money> {
    let payment = level_payment(terms.principal, factor, terms.number_of_payments)?;
    debug!(
        "blended payment {} over {} payments",
        payment, terms.number_of_payments
    );
    Ok(payment)
}

fn total_of_payments(terms: &LoanTerms, payment: Money) -> MortgageResult<Money> {
    payment
        .checked_mul(Decimal::from(terms.number_of_payments))
        .ok_or_else(|| {
            MortgageError::NumericOverflow(format!(
                "payment {} times {} payments",
                payment, terms.number_of_payments
            ))
        })
}

fn summary_for(terms: &LoanTerms, payment: Money) -> MortgageResult<SummaryStats> {
    let overflow = |what: &str| MortgageError::NumericOverflow(format!("{what} out of range"));

    let total_paid = total_of_payments(terms, payment)?;
    let total_interest_paid = total_paid
        .checked_sub(terms.principal)
        .ok_or_else(|| overflow("total interest paid"))?;
    let amortization_years =
        Decimal::from(terms.number_of_payments) / Decimal::from(terms.payment_frequency);
    let average_interest_per_year = total_interest_paid
        .checked_div(amortization_years)
        .ok_or_else(|| overflow("average interest per year"))?;
    let interest_to_principal_ratio = total_interest_paid
        .checked_div(terms.principal)
        .ok_or_else(|| overflow("interest to principal ratio"))?;

    Ok(SummaryStats {
        total_interest_paid,
        total_paid,
        interest_to_principal_ratio,
        amortization_years,
        average_interest_per_year,
        average_interest_per_month: average_interest_per_year / MONTHS_PER_YEAR,
    })
}

fn collect_warnings(terms: &LoanTerms) -> Vec<String> {
    let mut warnings = Vec::new();

    if !STANDARD_PAYMENT_FREQUENCIES.contains(&terms.payment_frequency) {
        warnings.push(format!(
            "Payment frequency of {} per year is not monthly, bi-weekly or weekly",
            terms.payment_frequency
        ));
    }
    if !STANDARD_COMPOUNDING_FREQUENCIES.contains(&terms.compounding_frequency) {
        warnings.push(format!(
            "Compounding frequency of {} per year is non-standard",
            terms.compounding_frequency
        ));
    }

    let years = Decimal::from(terms.number_of_payments) / Decimal::from(terms.payment_frequency);
    if !years.fract().is_zero() {
        warnings.push(format!(
            "Amortization spans {} years; yearly and monthly averages are pro-rated",
            years.round_dp(4).normalize()
        ));
    }
    if years > LONG_HORIZON_YEARS {
        warnings.push(format!(
            "Amortization of {} years is unusually long",
            years.round_dp(2).normalize()
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
