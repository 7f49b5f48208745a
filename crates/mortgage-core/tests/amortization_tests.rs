use mortgage_core::{
    calculate, compute_blended_payment, compute_periodic_interest_factor, compute_summary,
    generate_schedule, LoanTerms, MortgageError, PaymentRow,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{}: expected ~{}, got {} (diff = {})",
        msg,
        expected,
        actual,
        diff
    );
}

/// A spread of realistic loans across payment and compounding frequencies.
fn sample_loans() -> Vec<LoanTerms> {
    vec![
        // 30-year monthly, monthly compounding
        LoanTerms::new(dec!(200000), dec!(0.06), 360, 12, 12).unwrap(),
        // 25-year monthly, Canadian semi-annual compounding
        LoanTerms::new(dec!(450000), dec!(0.0489), 300, 12, 2).unwrap(),
        // ~24-year bi-weekly, semi-annual compounding
        LoanTerms::new(dec!(350000), dec!(0.0525), 625, 26, 2).unwrap(),
        // 25-year weekly, daily compounding
        LoanTerms::new(dec!(100000), dec!(0.03), 1300, 52, 365).unwrap(),
        // 15-year monthly, annual compounding
        LoanTerms::new(dec!(75000.50), dec!(0.0725), 180, 12, 1).unwrap(),
        // short quarterly-compounded loan with an odd principal
        LoanTerms::new(dec!(12345.67), dec!(0.11), 24, 12, 4).unwrap(),
    ]
}

// ===========================================================================
// Schedule invariants
// ===========================================================================

#[test]
fn test_principal_portions_sum_to_principal() {
    for terms in sample_loans() {
        let rows = generate_schedule(&terms).unwrap();
        let repaid: Decimal = rows.iter().map(|r| r.principal_portion).sum();
        assert_close(repaid, terms.principal, dec!(0.01), "principal repaid");
    }
}

#[test]
fn test_each_row_splits_payment_exactly() {
    for terms in sample_loans() {
        for row in generate_schedule(&terms).unwrap() {
            let recombined = row.interest_portion + row.principal_portion;
            let tolerance = row.payment.abs() * dec!(0.000000001);
            assert_close(recombined, row.payment, tolerance, "interest + principal");
        }
    }
}

#[test]
fn test_final_balance_is_exactly_zero() {
    for terms in sample_loans() {
        let rows = generate_schedule(&terms).unwrap();
        assert_eq!(rows.len(), terms.number_of_payments as usize);
        assert_eq!(rows.last().unwrap().remaining_balance, Decimal::ZERO);
    }
}

#[test]
fn test_balances_never_increase() {
    for terms in sample_loans() {
        let rows = generate_schedule(&terms).unwrap();
        let mut previous = terms.principal;
        for row in &rows {
            assert!(
                row.remaining_balance <= previous,
                "balance rose at payment {}: {} -> {}",
                row.index,
                previous,
                row.remaining_balance
            );
            previous = row.remaining_balance;
        }
    }
}

#[test]
fn test_rows_are_numbered_in_order() {
    let terms = LoanTerms::new(dec!(50000), dec!(0.04), 60, 12, 12).unwrap();
    let indices: Vec<u32> = generate_schedule(&terms)
        .unwrap()
        .iter()
        .map(|r| r.index)
        .collect();
    assert_eq!(indices, (1..=60).collect::<Vec<u32>>());
}

#[test]
fn test_payment_is_constant_across_rows() {
    for terms in sample_loans() {
        let payment = compute_blended_payment(&terms).unwrap();
        assert!(generate_schedule(&terms)
            .unwrap()
            .iter()
            .all(|r| r.payment == payment));
    }
}

// ===========================================================================
// Edge cases
// ===========================================================================

#[test]
fn test_zero_rate_loan() {
    let terms = LoanTerms::new(dec!(120000), Decimal::ZERO, 240, 12, 12).unwrap();

    assert_eq!(compute_periodic_interest_factor(&terms).unwrap(), Decimal::ZERO);
    assert_eq!(compute_blended_payment(&terms).unwrap(), dec!(500));

    let rows = generate_schedule(&terms).unwrap();
    assert!(rows.iter().all(|r| r.interest_portion.is_zero()));
    assert!(rows.iter().all(|r| r.principal_portion == dec!(500)));
    assert_eq!(rows.last().unwrap().remaining_balance, Decimal::ZERO);

    let summary = compute_summary(&terms).unwrap();
    assert_eq!(summary.total_interest_paid, Decimal::ZERO);
    assert_eq!(summary.amortization_years, dec!(20));
}

#[test]
fn test_zero_rate_with_uneven_division() {
    let terms = LoanTerms::new(dec!(1000), Decimal::ZERO, 3, 12, 2).unwrap();
    assert_eq!(
        compute_blended_payment(&terms).unwrap(),
        dec!(1000) / dec!(3)
    );
    let rows = generate_schedule(&terms).unwrap();
    assert_eq!(rows[2].remaining_balance, Decimal::ZERO);
}

#[test]
fn test_single_payment_loan() {
    let terms = LoanTerms::new(dec!(5000), dec!(0.07), 1, 12, 12).unwrap();
    let rows = generate_schedule(&terms).unwrap();

    assert_eq!(rows.len(), 1);
    let only: &PaymentRow = &rows[0];
    assert_close(only.principal_portion, dec!(5000), dec!(0.01), "principal");
    assert_eq!(only.remaining_balance, Decimal::ZERO);
    // One month of interest at 7% / 12
    assert_close(only.interest_portion, dec!(29.17), dec!(0.01), "interest");
}

#[test]
fn test_semi_annual_compounding_monthly_payments() {
    let terms = LoanTerms::new(dec!(200000), dec!(0.06), 360, 12, 2).unwrap();
    let factor = compute_periodic_interest_factor(&terms).unwrap();
    assert_close(factor, dec!(0.0049386220), dec!(0.0000000001), "factor");

    let payment = compute_blended_payment(&terms).unwrap();
    assert_close(payment, dec!(1189.65), dec!(0.01), "payment");
}

#[test]
fn test_fractional_amortization_years_allowed() {
    // 100 bi-weekly payments = 3.846... years
    let terms = LoanTerms::new(dec!(20000), dec!(0.05), 100, 26, 12).unwrap();
    let summary = compute_summary(&terms).unwrap();
    assert_eq!(summary.amortization_years, dec!(100) / dec!(26));
    assert_eq!(
        summary.average_interest_per_month,
        summary.average_interest_per_year / dec!(12)
    );
}

// ===========================================================================
// Concrete scenario
// ===========================================================================

#[test]
fn test_standard_thirty_year_mortgage() {
    let terms = LoanTerms::new(dec!(200000), dec!(0.06), 360, 12, 12).unwrap();

    assert_eq!(compute_periodic_interest_factor(&terms).unwrap(), dec!(0.005));
    assert_close(
        compute_blended_payment(&terms).unwrap(),
        dec!(1199.10),
        dec!(0.01),
        "blended payment",
    );

    let summary = compute_summary(&terms).unwrap();
    assert_close(
        summary.total_interest_paid,
        dec!(231676.38),
        dec!(0.01),
        "total interest",
    );
    assert_eq!(summary.amortization_years, dec!(30));
}

// ===========================================================================
// Entry point
// ===========================================================================

#[test]
fn test_calculate_is_byte_identical_across_calls() {
    for terms in sample_loans() {
        let first = calculate(&terms).unwrap();
        let second = calculate(&terms.clone()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_calculate_report_has_one_line_per_payment() {
    let terms = LoanTerms::new(dec!(10000), dec!(0.05), 12, 12, 12).unwrap();
    let report = calculate(&terms).unwrap();
    let table_rows = report
        .lines()
        .filter(|line| line.trim_start().starts_with(|c: char| c.is_ascii_digit()))
        .count();
    assert_eq!(table_rows, 12);
    assert!(report.contains("Additional Information:"));
}

#[test]
fn test_negative_principal_is_rejected() {
    let result = LoanTerms::new(dec!(-100), dec!(0.05), 12, 12, 12);
    match result {
        Err(MortgageError::InvalidInput { field, .. }) => assert_eq!(field, "principal"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }

    let unchecked = LoanTerms {
        principal: dec!(-100),
        annual_interest_rate: dec!(0.05),
        number_of_payments: 12,
        payment_frequency: 12,
        compounding_frequency: 12,
    };
    assert!(matches!(
        calculate(&unchecked),
        Err(MortgageError::InvalidInput { .. })
    ));
    assert!(generate_schedule(&unchecked).is_err());
}

#[test]
fn test_payment_beyond_decimal_range_is_an_error() {
    let terms = LoanTerms::new(dec!(79000000000000000000000000000), dec!(0.06), 1, 12, 12).unwrap();
    assert!(matches!(
        calculate(&terms),
        Err(MortgageError::NumericOverflow(_))
    ));
    assert!(matches!(
        compute_summary(&terms),
        Err(MortgageError::NumericOverflow(_))
    ));
    assert!(generate_schedule(&terms).is_err());
}

#[test]
fn test_largest_representable_loan_still_amortizes() {
    let terms = LoanTerms::new(dec!(70000000000000000000000000000), dec!(0.06), 1, 12, 12).unwrap();
    let rows = generate_schedule(&terms).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(calculate(&terms).is_ok());
}

// ===========================================================================
// Serialization and thread-safety
// ===========================================================================

#[test]
fn test_terms_deserialize_from_numbers_and_strings() {
    let json = r#"{
        "principal": "200000",
        "annual_interest_rate": 0.06,
        "number_of_payments": 360,
        "payment_frequency": 12,
        "compounding_frequency": 12
    }"#;
    let terms: LoanTerms = serde_json::from_str(json).unwrap();
    assert_eq!(
        terms,
        LoanTerms::new(dec!(200000), dec!(0.06), 360, 12, 12).unwrap()
    );
}

fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<LoanTerms>();
    is_normal::<PaymentRow>();
    is_normal::<mortgage_core::Schedule>();
    is_normal::<mortgage_core::AmortizationOutput>();
}
