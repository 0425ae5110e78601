// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cost arithmetic on per-million-token prices.

use tok_core::TokError;

const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Stateless cost calculations.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostCalculator;

impl CostCalculator {
    /// Cost in USD of `tokens` at `price_per_million`.
    ///
    /// Formula: `(tokens / 1_000_000) * price_per_million`, unrounded.
    pub fn cost(tokens: u64, price_per_million: f64) -> f64 {
        (tokens as f64 / TOKENS_PER_MILLION) * price_per_million
    }

    /// `$` followed by the cost with four decimals, e.g. `$0.0025`.
    pub fn format_cost(cost: f64) -> String {
        format!("${cost:.4}")
    }

    /// Whole tokens one dollar buys at `price_per_million`.
    pub fn tokens_per_dollar(price_per_million: f64) -> Result<u64, TokError> {
        if !price_per_million.is_finite() || price_per_million <= 0.0 {
            return Err(TokError::invalid_argument(format!(
                "price must be positive to compute tokens per dollar, got {price_per_million}"
            )));
        }
        Ok((TOKENS_PER_MILLION / price_per_million).floor() as u64)
    }

    /// Per-million price for listings, e.g. `$2.5/M`.
    pub fn format_price(price_per_million: f64) -> String {
        format!("${price_per_million}/M")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cost_of_a_million_tokens_is_the_price() {
        assert!((CostCalculator::cost(1_000_000, 2.5) - 2.5).abs() < f64::EPSILON);
        assert!((CostCalculator::cost(1_000_000, 75.0) - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn cost_is_not_rounded() {
        // 1000 tokens at $2.50/M.
        assert!((CostCalculator::cost(1000, 2.5) - 0.0025).abs() < 1e-12);
        assert!((CostCalculator::cost(1, 0.15) - 0.000_000_15).abs() < 1e-18);
    }

    #[test]
    fn zero_tokens_zero_cost() {
        assert!(CostCalculator::cost(0, 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn format_cost_uses_four_decimals() {
        assert_eq!(CostCalculator::format_cost(0.0025), "$0.0025");
        assert_eq!(CostCalculator::format_cost(0.0), "$0.0000");
        assert_eq!(CostCalculator::format_cost(12.5), "$12.5000");
        assert_eq!(CostCalculator::format_cost(0.000_04), "$0.0000");
    }

    #[test]
    fn tokens_per_dollar() {
        assert_eq!(CostCalculator::tokens_per_dollar(2.50).unwrap(), 400_000);
        assert_eq!(CostCalculator::tokens_per_dollar(3.0).unwrap(), 333_333);
        assert_eq!(CostCalculator::tokens_per_dollar(0.15).unwrap(), 6_666_666);
    }

    #[test]
    fn tokens_per_dollar_rejects_non_positive_prices() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = CostCalculator::tokens_per_dollar(bad).unwrap_err();
            assert_eq!(err.kind(), tok_core::ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn format_price_drops_trailing_zeros() {
        assert_eq!(CostCalculator::format_price(2.5), "$2.5/M");
        assert_eq!(CostCalculator::format_price(10.0), "$10/M");
        assert_eq!(CostCalculator::format_price(0.15), "$0.15/M");
    }

    proptest! {
        #[test]
        fn cost_matches_formula(tokens in 0u64..10_000_000_000, price in 0.0f64..1000.0) {
            let expected = (tokens as f64 / 1_000_000.0) * price;
            prop_assert_eq!(CostCalculator::cost(tokens, price), expected);
        }
    }
}
