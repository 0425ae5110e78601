// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The estimate result returned by `tok estimate` and the `estimate_tokens` tool.

use serde::Serialize;
use tok_core::{EstimationMethod, TokError};
use tok_cost::{CostCalculator, ModelPrice, PriceTable};
use tracing::warn;

use crate::Estimators;

/// Shown in place of a cost when the model has no price.
pub const NO_PRICE: &str = "N/A";

/// Token count and prompt-side cost for one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateReport {
    /// Length of the text in characters.
    pub text_length: usize,
    pub tokens: usize,
    pub model: String,
    /// Formatted cost, or `N/A` when the model is not priced.
    pub cost: String,
    pub method: EstimationMethod,
    /// Whether the usage was added to the tracking session.
    pub tracked: bool,
    /// Price the cost was computed with; used by callers that track.
    #[serde(skip)]
    pub price: Option<ModelPrice>,
}

impl EstimateReport {
    /// Estimate `text` and price it as prompt tokens for `model`.
    ///
    /// Empty text is rejected. An unpriced model is not an error: the cost is
    /// reported as `N/A` and a warning is logged.
    pub fn build(
        estimators: &Estimators,
        prices: &PriceTable,
        text: &str,
        model: &str,
        exact: bool,
    ) -> Result<Self, TokError> {
        if text.is_empty() {
            return Err(TokError::invalid_argument("Please provide text to estimate"));
        }

        let estimation = estimators.estimate(text, exact)?;
        let price = prices.get(model);
        let cost = match price {
            Some(p) => CostCalculator::format_cost(CostCalculator::cost(
                estimation.tokens as u64,
                p.prompt,
            )),
            None => {
                warn!(model, "no pricing available for model");
                NO_PRICE.to_string()
            }
        };

        Ok(Self {
            text_length: text.chars().count(),
            tokens: estimation.tokens,
            model: model.to_string(),
            cost,
            method: estimation.method,
            tracked: false,
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tok_core::ErrorKind;

    #[test]
    fn prices_prompt_tokens() {
        let est = Estimators::new(4.0).unwrap();
        let report = EstimateReport::build(
            &est,
            &PriceTable::default(),
            "Hello world",
            "gpt-4o",
            false,
        )
        .unwrap();

        assert_eq!(report.text_length, 11);
        assert_eq!(report.tokens, 3);
        assert_eq!(report.model, "gpt-4o");
        // 3 tokens at $2.50/M
        assert_eq!(report.cost, "$0.0000");
        assert_eq!(report.method, EstimationMethod::Estimate);
        assert!(!report.tracked);
        assert!(report.price.is_some());
    }

    #[test]
    fn unknown_model_costs_na() {
        let est = Estimators::new(4.0).unwrap();
        let report =
            EstimateReport::build(&est, &PriceTable::default(), "abc", "mystery", false).unwrap();
        assert_eq!(report.cost, NO_PRICE);
        assert!(report.price.is_none());
    }

    #[test]
    fn large_text_cost() {
        let est = Estimators::new(4.0).unwrap();
        let text = "a".repeat(4_000_000);
        let report =
            EstimateReport::build(&est, &PriceTable::default(), &text, "gpt-4o", false).unwrap();
        assert_eq!(report.tokens, 1_000_000);
        assert_eq!(report.cost, "$2.5000");
    }

    #[test]
    fn empty_text_is_rejected() {
        let est = Estimators::new(4.0).unwrap();
        let err =
            EstimateReport::build(&est, &PriceTable::default(), "", "gpt-4o", false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.to_string(), "Please provide text to estimate");
    }

    #[test]
    fn serializes_expected_fields() {
        let est = Estimators::new(4.0).unwrap();
        let report =
            EstimateReport::build(&est, &PriceTable::default(), "Hello", "gpt-4o", false).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["text_length"], 5);
        assert_eq!(json["method"], "estimate");
        assert_eq!(json["tracked"], false);
        assert!(json.get("price").is_none());
    }
}
