use clap::Args;
use log::info;
use rust_decimal::Decimal;

use mortgage_core::amortization::report::{render_payment_quote, render_summary};
use mortgage_core::time_value::percent_to_rate;
use mortgage_core::{
    amortize, quote_payment, render_amortization_report, summarize, CompoundingFrequency,
    LoanTerms, PaymentFrequency,
};

use super::CommandOutput;
use crate::input;

/// Loan terms shared by every amortization command
#[derive(Args, Debug)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Loan principal (e.g. 200000)
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (e.g. 6 for 6%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Total number of payments over the life of the loan
    #[arg(long)]
    pub payments: Option<u32>,

    /// Payment frequency: monthly, bi-weekly or weekly
    #[arg(long, default_value = "monthly")]
    pub frequency: PaymentFrequency,

    /// Compounding frequency: annually, semi-annually, quarterly, monthly,
    /// daily (or 1, 2, 4, 12, 365)
    #[arg(long, default_value = "annually")]
    pub compounding: CompoundingFrequency,

    /// Path to a JSON or YAML terms file, rate as a decimal (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl LoanArgs {
    fn has_flags(&self) -> bool {
        self.principal.is_some() || self.rate.is_some() || self.payments.is_some()
    }
}

/// Resolve terms from `--input`, then flags, then piped stdin.
pub fn resolve_terms(args: &LoanArgs) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if args.has_flags() {
        terms_from_flags(args)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err(
            "--principal, --rate and --payments are required (or provide --input or stdin)".into(),
        );
    };

    terms.validate()?;
    info!(
        "terms: principal {}, rate {}, {} payments, {}/yr payments, {}/yr compounding",
        terms.principal,
        terms.annual_interest_rate,
        terms.number_of_payments,
        terms.payment_frequency,
        terms.compounding_frequency
    );
    Ok(terms)
}

fn terms_from_flags(args: &LoanArgs) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    let principal = args
        .principal
        .ok_or("--principal is required (or provide --input)")?;
    let rate_percent = args
        .rate
        .ok_or("--rate is required (or provide --input)")?;
    let payments = args
        .payments
        .ok_or("--payments is required (or provide --input)")?;

    Ok(LoanTerms::new(
        principal,
        percent_to_rate(rate_percent),
        payments,
        args.frequency.periods_per_year(),
        args.compounding.periods_per_year(),
    )?)
}

pub fn run_schedule(args: LoanArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args)?;
    let result = amortize(&terms)?;
    let report = render_amortization_report(&terms, &result.result)?;
    Ok(CommandOutput {
        value: serde_json::to_value(result)?,
        report,
    })
}

pub fn run_payment(args: LoanArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args)?;
    let result = quote_payment(&terms)?;
    let report = render_payment_quote(&result.result);
    Ok(CommandOutput {
        value: serde_json::to_value(result)?,
        report,
    })
}

pub fn run_summary(args: LoanArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args)?;
    let result = summarize(&terms)?;
    let report = render_summary(&result.result);
    Ok(CommandOutput {
        value: serde_json::to_value(result)?,
        report,
    })
}
