//! Loan terms and the enumerated frequencies a caller can pick from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MortgageError;
use crate::types::{Money, Rate};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// LoanTerms
// ---------------------------------------------------------------------------

/// The five inputs of a fixed-payment mortgage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Original loan amount.
    pub principal: Money,
    /// Nominal annual rate as a decimal (0.05 = 5%).
    pub annual_interest_rate: Rate,
    /// Total number of payments over the life of the loan.
    pub number_of_payments: u32,
    /// Payments per year (12 = monthly, 26 = bi-weekly, 52 = weekly).
    pub payment_frequency: u32,
    /// Compounding periods per year.
    pub compounding_frequency: u32,
}

impl LoanTerms {
    /// Build and validate a set of terms.
    pub fn new(
        principal: Money,
        annual_interest_rate: Rate,
        number_of_payments: u32,
        payment_frequency: u32,
        compounding_frequency: u32,
    ) -> MortgageResult<Self> {
        let terms = Self {
            principal,
            annual_interest_rate,
            number_of_payments,
            payment_frequency,
            compounding_frequency,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Check every field constraint, reporting the first violation.
    pub fn validate(&self) -> MortgageResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "principal",
                "Principal must be positive",
            ));
        }
        if self.annual_interest_rate < Decimal::ZERO {
            return Err(MortgageError::invalid(
                "annual_interest_rate",
                "Annual interest rate cannot be negative",
            ));
        }
        if self.number_of_payments == 0 {
            return Err(MortgageError::invalid(
                "number_of_payments",
                "Number of payments must be greater than zero",
            ));
        }
        if self.payment_frequency == 0 {
            return Err(MortgageError::invalid(
                "payment_frequency",
                "Payment frequency must be greater than zero",
            ));
        }
        if self.compounding_frequency == 0 {
            return Err(MortgageError::invalid(
                "compounding_frequency",
                "Compounding frequency must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Human-readable label for the payment frequency.
    pub fn payment_frequency_label(&self) -> String {
        match PaymentFrequency::from_periods(self.payment_frequency) {
            Some(freq) => freq.to_string(),
            None => format!("{} per year", self.payment_frequency),
        }
    }

    /// Human-readable label for the compounding frequency.
    pub fn compounding_frequency_label(&self) -> String {
        match CompoundingFrequency::from_periods(self.compounding_frequency) {
            Some(freq) => freq.to_string(),
            None => format!("{} per year", self.compounding_frequency),
        }
    }
}

// ---------------------------------------------------------------------------
// Payment frequency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    BiWeekly,
    Weekly,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 3] = [
        PaymentFrequency::Monthly,
        PaymentFrequency::BiWeekly,
        PaymentFrequency::Weekly,
    ];

    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::BiWeekly => 26,
            PaymentFrequency::Weekly => 52,
        }
    }

    pub fn from_periods(periods: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|freq| freq.periods_per_year() == periods)
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentFrequency::Monthly => "Monthly",
            PaymentFrequency::BiWeekly => "Bi-Weekly",
            PaymentFrequency::Weekly => "Weekly",
        };
        f.write_str(label)
    }
}

impl FromStr for PaymentFrequency {
    type Err = MortgageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "bi-weekly" | "biweekly" => Ok(PaymentFrequency::BiWeekly),
            "weekly" => Ok(PaymentFrequency::Weekly),
            other => Err(MortgageError::InvalidInput {
                field: "payment_frequency".into(),
                reason: format!("'{other}' is not one of monthly, bi-weekly, weekly"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Compounding frequency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompoundingFrequency {
    #[default]
    Annually,
    SemiAnnually,
    Quarterly,
    Monthly,
    Daily,
}

impl CompoundingFrequency {
    pub const ALL: [CompoundingFrequency; 5] = [
        CompoundingFrequency::Annually,
        CompoundingFrequency::SemiAnnually,
        CompoundingFrequency::Quarterly,
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Daily,
    ];

    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::SemiAnnually => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
        }
    }

    pub fn from_periods(periods: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|freq| freq.periods_per_year() == periods)
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CompoundingFrequency::Annually => "Annually",
            CompoundingFrequency::SemiAnnually => "Semi-Annually",
            CompoundingFrequency::Quarterly => "Quarterly",
            CompoundingFrequency::Monthly => "Monthly",
            CompoundingFrequency::Daily => "Daily",
        };
        f.write_str(label)
    }
}

impl FromStr for CompoundingFrequency {
    type Err = MortgageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if let Ok(periods) = normalized.parse::<u32>() {
            return Self::from_periods(periods).ok_or_else(|| MortgageError::InvalidInput {
                field: "compounding_frequency".into(),
                reason: format!("{periods} is not one of 1, 2, 4, 12, 365"),
            });
        }
        match normalized.as_str() {
            "annually" | "annual" => Ok(CompoundingFrequency::Annually),
            "semi-annually" | "semiannually" | "semi-annual" => {
                Ok(CompoundingFrequency::SemiAnnually)
            }
            "quarterly" => Ok(CompoundingFrequency::Quarterly),
            "monthly" => Ok(CompoundingFrequency::Monthly),
            "daily" => Ok(CompoundingFrequency::Daily),
            other => Err(MortgageError::InvalidInput {
                field: "compounding_frequency".into(),
                reason: format!(
                    "'{other}' is not one of annually, semi-annually, quarterly, monthly, daily"
                ),
            }),
        }
    }
}
