use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::math::{checked_powi, gcd, nth_root};
use crate::types::{Money, Rate};
use crate::MortgageResult;

/// Effective rate per payment period for a nominal annual rate compounded
/// `compounding` times a year: `(1 + r/c)^(c/p) - 1`.
///
/// The exponent `c/p` is reduced to lowest terms `a/b`, so the result is
/// the `b`-th root of `(1 + r/c)^a`. When `c == p` no root is taken and the
/// result is exactly `r/c`.
pub fn effective_periodic_rate(
    nominal: Rate,
    compounding: u32,
    payments_per_year: u32,
) -> MortgageResult<Rate> {
    if compounding == 0 {
        return Err(MortgageError::invalid(
            "compounding_frequency",
            "Compounding frequency must be greater than zero",
        ));
    }
    if payments_per_year == 0 {
        return Err(MortgageError::invalid(
            "payment_frequency",
            "Payment frequency must be greater than zero",
        ));
    }
    if nominal < Decimal::ZERO {
        return Err(MortgageError::invalid(
            "annual_interest_rate",
            "Annual interest rate cannot be negative",
        ));
    }
    if nominal.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let divisor = gcd(compounding, payments_per_year);
    let (power, root) = (compounding / divisor, payments_per_year / divisor);

    let base = Decimal::ONE + nominal / Decimal::from(compounding);
    let grown = checked_powi(base, power).ok_or_else(|| {
        MortgageError::NumericOverflow(format!(
            "(1 + {nominal}/{compounding})^{power} exceeds the decimal range"
        ))
    })?;
    let per_period = nth_root(grown, root).ok_or_else(|| {
        MortgageError::NumericOverflow(format!("root {root} of {grown} could not be resolved"))
    })?;

    Ok(per_period - Decimal::ONE)
}

/// Level (annuity) payment retiring `principal` over `nper` periods at `rate`
/// per period: `P * i / (1 - (1 + i)^-n)`, or `P / n` at a zero rate.
pub fn level_payment(principal: Money, rate: Rate, nper: u32) -> MortgageResult<Money> {
    if nper == 0 {
        return Err(MortgageError::invalid(
            "number_of_payments",
            "Number of payments must be greater than zero",
        ));
    }
    if rate < Decimal::ZERO {
        return Err(MortgageError::invalid(
            "rate",
            "Periodic rate cannot be negative",
        ));
    }

    let straight_line = principal / Decimal::from(nper);
    if rate.is_zero() {
        return Ok(straight_line);
    }

    // Growth beyond the decimal range means the discount term is negligible.
    let discount = match checked_powi(Decimal::ONE + rate, nper) {
        Some(growth) if !growth.is_zero() => Decimal::ONE / growth,
        _ => Decimal::ZERO,
    };

    let denominator = Decimal::ONE - discount;
    if denominator <= Decimal::ZERO {
        // Rate below decimal resolution over this horizon.
        return Ok(straight_line);
    }

    let numerator = principal.checked_mul(rate).ok_or_else(|| {
        MortgageError::NumericOverflow(format!("principal {principal} times rate {rate}"))
    })?;
    numerator.checked_div(denominator).ok_or_else(|| {
        MortgageError::NumericOverflow(format!(
            "level payment on principal {principal} at periodic rate {rate}"
        ))
    })
}

/// Convert a percentage quote (6 = 6%) into a decimal rate.
pub fn percent_to_rate(percent: Decimal) -> Rate {
    percent / dec!(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "expected ~{}, got {} (diff = {})",
            expected,
            actual,
            diff
        );
    }

    #[test]
    fn test_periodic_rate_matching_frequencies_is_exact() {
        let result = effective_periodic_rate(dec!(0.06), 12, 12).unwrap();
        assert_eq!(result, dec!(0.005));
    }

    #[test]
    fn test_periodic_rate_semi_annual_compounding_monthly_payments() {
        let result = effective_periodic_rate(dec!(0.06), 2, 12).unwrap();
        assert_close(result, dec!(0.004938622031), dec!(0.000000000001));
    }

    #[test]
    fn test_periodic_rate_daily_compounding() {
        let monthly = effective_periodic_rate(dec!(0.05), 365, 12).unwrap();
        assert_close(monthly, dec!(0.0041750727376), dec!(0.0000000001));

        let bi_weekly = effective_periodic_rate(dec!(0.05), 365, 26).unwrap();
        assert_close(bi_weekly, dec!(0.0019247952623), dec!(0.0000000001));
    }

    #[test]
    fn test_periodic_rate_zero_nominal() {
        assert_eq!(
            effective_periodic_rate(Decimal::ZERO, 365, 52).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_periodic_rate_rejects_zero_frequencies() {
        assert!(effective_periodic_rate(dec!(0.05), 0, 12).is_err());
        assert!(effective_periodic_rate(dec!(0.05), 12, 0).is_err());
    }

    #[test]
    fn test_periodic_rate_rejects_negative_nominal() {
        let err = effective_periodic_rate(dec!(-0.01), 12, 12).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_periodic_rate_beyond_decimal_range() {
        let result = effective_periodic_rate(dec!(70000000000000000000000000000), 1, 52);
        assert!(matches!(result, Err(MortgageError::NumericOverflow(_))));
    }

    #[test]
    fn test_level_payment_thirty_year_mortgage() {
        let result = level_payment(dec!(200000), dec!(0.005), 360).unwrap();
        assert_close(result, dec!(1199.1010503055), dec!(0.000001));
    }

    #[test]
    fn test_level_payment_zero_rate() {
        let result = level_payment(dec!(1200), Decimal::ZERO, 12).unwrap();
        assert_eq!(result, dec!(100));
    }

    #[test]
    fn test_level_payment_single_period() {
        // One period: principal plus one period of interest.
        let result = level_payment(dec!(1000), dec!(0.01), 1).unwrap();
        assert_close(result, dec!(1010), dec!(0.0000000001));
    }

    #[test]
    fn test_level_payment_beyond_decimal_range() {
        let result = level_payment(dec!(79000000000000000000000000000), dec!(0.005), 1);
        assert!(matches!(result, Err(MortgageError::NumericOverflow(_))));
    }

    #[test]
    fn test_level_payment_rejects_zero_periods() {
        assert!(level_payment(dec!(1000), dec!(0.01), 0).is_err());
    }

    #[test]
    fn test_percent_to_rate() {
        assert_eq!(percent_to_rate(dec!(6)), dec!(0.06));
        assert_eq!(percent_to_rate(dec!(4.25)), dec!(0.0425));
    }
}
