//! Income tax and pension deduction helpers
//!
//! The pension projection reports the tax saved by deducting a contribution
//! from annual income, evaluated against a progressive bracket schedule.

use serde::{Deserialize, Serialize};

/// A marginal rate applied to income above `threshold`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub threshold: f64,
    pub rate: f64,
}

/// Five-band schedule: 0% up to 7L, 10% to 10L, 15% to 12L, 20% to 15L, 30% above.
pub fn default_brackets() -> Vec<TaxBracket> {
    vec![
        TaxBracket {
            threshold: 0.0,
            rate: 0.0,
        },
        TaxBracket {
            threshold: 700_000.0,
            rate: 0.10,
        },
        TaxBracket {
            threshold: 1_000_000.0,
            rate: 0.15,
        },
        TaxBracket {
            threshold: 1_200_000.0,
            rate: 0.20,
        },
        TaxBracket {
            threshold: 1_500_000.0,
            rate: 0.30,
        },
    ]
}

/// Slab tax on `income`.
///
/// Brackets must be sorted by threshold. Each band runs from its own
/// threshold up to the next one (the last band is open-ended), and its rate
/// applies only to the income that falls inside it.
pub fn calculate_income_tax(income: f64, brackets: &[TaxBracket]) -> f64 {
    let band_tops = brackets
        .iter()
        .skip(1)
        .map(|next| next.threshold)
        .chain(std::iter::once(f64::INFINITY));

    brackets
        .iter()
        .zip(band_tops)
        .take_while(|(band, _)| income > band.threshold)
        .map(|(band, top)| (income.min(top) - band.threshold) * band.rate)
        .fold(0.0, |tax, slice| tax + slice)
}

/// Deductible part of a pension contribution:
/// `min(contribution, annual_income * rate, cap)`
pub fn pension_deduction(contribution: f64, annual_income: f64, rate: f64, cap: f64) -> f64 {
    contribution.min((annual_income * rate).min(cap))
}

/// Tax saved by removing `deduction` from `annual_income`.
/// Both evaluations use the same schedule.
pub fn tax_benefit(annual_income: f64, deduction: f64, brackets: &[TaxBracket]) -> f64 {
    calculate_income_tax(annual_income, brackets)
        - calculate_income_tax(annual_income - deduction, brackets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_below_first_taxed_band() {
        let brackets = default_brackets();
        assert_eq!(calculate_income_tax(600_000.0, &brackets), 0.0);
        assert_eq!(calculate_income_tax(700_000.0, &brackets), 0.0);
        assert_eq!(calculate_income_tax(-5.0, &brackets), 0.0);
        assert_eq!(calculate_income_tax(f64::NAN, &brackets), 0.0);
        assert_eq!(calculate_income_tax(1_000_000.0, &[]), 0.0);
    }

    #[test]
    fn test_income_inside_middle_band_only_taxes_lower_bands_in_full() {
        // 100k at 10% + 50k at 15%
        let tax = calculate_income_tax(1_050_000.0, &default_brackets());
        assert!((tax - 37_500.0).abs() < 0.01, "got {tax}");
    }

    #[test]
    fn test_income_tax_band_boundaries() {
        let brackets = default_brackets();
        // (income, expected)
        let cases = [
            (1_000_000.0, 30_000.0),
            (1_100_000.0, 45_000.0),
            (1_200_000.0, 60_000.0),
            (1_500_000.0, 120_000.0),
            (2_000_000.0, 270_000.0),
        ];
        for (income, expected) in cases {
            let tax = calculate_income_tax(income, &brackets);
            assert!(
                (tax - expected).abs() < 0.01,
                "income {income}: expected {expected}, got {tax}"
            );
        }
    }

    #[test]
    fn test_pension_deduction_takes_smallest_limit() {
        // Contribution is the limit
        assert_eq!(pension_deduction(145.0, 600_000.0, 0.10, 200_000.0), 145.0);
        // 10% of income is the limit
        assert_eq!(
            pension_deduction(300_000.0, 1_200_000.0, 0.10, 200_000.0),
            120_000.0
        );
        // Absolute cap is the limit
        assert_eq!(
            pension_deduction(500_000.0, 6_000_000.0, 0.10, 200_000.0),
            200_000.0
        );
    }

    #[test]
    fn test_tax_benefit_in_fifteen_percent_band() {
        let brackets = default_brackets();
        let benefit = tax_benefit(1_200_000.0, 145.0, &brackets);
        assert!((benefit - 21.75).abs() < 1e-6, "got {benefit}");
    }

    #[test]
    fn test_tax_benefit_is_zero_below_threshold() {
        let brackets = default_brackets();
        assert_eq!(tax_benefit(600_000.0, 145.0, &brackets), 0.0);
    }
}
