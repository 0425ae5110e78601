// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model price table.
//!
//! Prices are in USD per million tokens. The built-in defaults:
//!
//! | model | prompt | completion |
//! |-------|--------|------------|
//! | gpt-4o | 2.50 | 10.00 |
//! | gpt-4o-mini | 0.15 | 0.60 |
//! | gpt-4-turbo | 10.00 | 30.00 |
//! | gpt-3.5-turbo | 0.50 | 1.50 |
//! | claude-3-opus | 15.00 | 75.00 |
//! | claude-3-sonnet | 3.00 | 15.00 |
//! | claude-3-haiku | 0.25 | 1.25 |
//! | claude-2.1 | 8.00 | 24.00 |
//! | llama-3-70b | 0.80 | 1.20 |
//! | llama-3-8b | 0.20 | 0.30 |
//! | mixtral-8x7b | 0.45 | 0.70 |

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tok_core::TokError;

/// Per-model pricing in USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPrice {
    /// Cost per million prompt (input) tokens.
    pub prompt: f64,
    /// Cost per million completion (output) tokens.
    pub completion: f64,
}

impl ModelPrice {
    /// Checked constructor: both prices must be finite and positive.
    pub fn new(prompt: f64, completion: f64) -> Result<Self, TokError> {
        if !prompt.is_finite() || !completion.is_finite() {
            return Err(TokError::invalid_argument("Prices must be valid numbers"));
        }
        if prompt <= 0.0 || completion <= 0.0 {
            return Err(TokError::invalid_argument("Prices must be positive"));
        }
        Ok(Self { prompt, completion })
    }
}

/// Built-in prices, merged into every [`PriceTable`].
pub const DEFAULT_PRICES: &[(&str, ModelPrice)] = &[
    ("gpt-4o", price(2.50, 10.00)),
    ("gpt-4o-mini", price(0.15, 0.60)),
    ("gpt-4-turbo", price(10.00, 30.00)),
    ("gpt-3.5-turbo", price(0.50, 1.50)),
    ("claude-3-opus", price(15.00, 75.00)),
    ("claude-3-sonnet", price(3.00, 15.00)),
    ("claude-3-haiku", price(0.25, 1.25)),
    ("claude-2.1", price(8.00, 24.00)),
    ("llama-3-70b", price(0.80, 1.20)),
    ("llama-3-8b", price(0.20, 0.30)),
    ("mixtral-8x7b", price(0.45, 0.70)),
];

const fn price(prompt: f64, completion: f64) -> ModelPrice {
    ModelPrice { prompt, completion }
}

/// Insertion-ordered mapping from model name to price.
///
/// Model names are case-sensitive. Entries can be added or overwritten but
/// never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    prices: IndexMap<String, ModelPrice>,
}

impl PriceTable {
    /// Build a table from an optional initial mapping, then fill in any
    /// built-in defaults the mapping does not already name.
    pub fn new(initial: Option<IndexMap<String, ModelPrice>>) -> Self {
        let mut prices = initial.unwrap_or_default();
        for (model, price) in DEFAULT_PRICES {
            prices.entry((*model).to_string()).or_insert(*price);
        }
        Self { prices }
    }

    /// Table holding only the built-in defaults.
    pub fn with_defaults() -> Self {
        Self::new(None)
    }

    /// Price for `model`, or `None` when no pricing is known.
    pub fn get(&self, model: &str) -> Option<ModelPrice> {
        self.prices.get(model).copied()
    }

    /// Insert or overwrite the price for `model`.
    ///
    /// No validation happens here; use [`ModelPrice::new`] for user input.
    pub fn set(&mut self, model: impl Into<String>, price: ModelPrice) {
        self.prices.insert(model.into(), price);
    }

    pub fn has(&self, model: &str) -> bool {
        self.prices.contains_key(model)
    }

    /// A copy of every entry, in insertion order.
    pub fn list(&self) -> IndexMap<String, ModelPrice> {
        self.prices.clone()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_price(actual: Option<ModelPrice>, prompt: f64, completion: f64) {
        let p = actual.expect("price present");
        assert!((p.prompt - prompt).abs() < f64::EPSILON);
        assert!((p.completion - completion).abs() < f64::EPSILON);
    }

    #[test]
    fn defaults_are_present() {
        let table = PriceTable::default();
        assert_eq!(table.len(), 11);
        assert_price(table.get("gpt-4o"), 2.5, 10.0);
        assert_price(table.get("claude-3-haiku"), 0.25, 1.25);
        assert_price(table.get("mixtral-8x7b"), 0.45, 0.70);
    }

    #[test]
    fn initial_mapping_keeps_defaults_for_other_models() {
        let mut initial = IndexMap::new();
        initial.insert("m".to_string(), ModelPrice::new(5.0, 15.0).unwrap());
        let table = PriceTable::new(Some(initial));
        assert_eq!(table.len(), 12);
        assert_price(table.get("m"), 5.0, 15.0);
        assert_price(table.get("gpt-4o"), 2.5, 10.0);
    }

    #[test]
    fn initial_mapping_wins_over_defaults() {
        let mut initial = IndexMap::new();
        initial.insert("gpt-4o".to_string(), price(1.0, 1.0));
        let table = PriceTable::new(Some(initial));
        assert_eq!(table.len(), 11);
        assert_price(table.get("gpt-4o"), 1.0, 1.0);
    }

    #[test]
    fn set_overwrites_defaults() {
        let mut table = PriceTable::default();
        table.set("gpt-4o", price(3.0, 12.0));
        assert_price(table.get("gpt-4o"), 3.0, 12.0);
        assert_eq!(table.len(), 11);
    }

    #[test]
    fn model_names_are_case_sensitive() {
        let table = PriceTable::default();
        assert!(table.has("gpt-4o"));
        assert!(!table.has("GPT-4O"));
        assert!(table.get("GPT-4O").is_none());
    }

    #[test]
    fn list_is_a_copy_in_insertion_order() {
        let mut table = PriceTable::default();
        table.set("custom", price(1.0, 2.0));
        let mut listed = table.list();
        listed.clear();
        assert_eq!(table.len(), 12);

        let names: Vec<String> = table.list().into_keys().collect();
        assert_eq!(names.first().map(String::as_str), Some("gpt-4o"));
        assert_eq!(names.last().map(String::as_str), Some("custom"));
    }

    #[test]
    fn checked_constructor_rejects_bad_prices() {
        assert_eq!(
            ModelPrice::new(0.0, 1.0).unwrap_err().to_string(),
            "Prices must be positive"
        );
        assert_eq!(
            ModelPrice::new(1.0, -2.0).unwrap_err().to_string(),
            "Prices must be positive"
        );
        assert_eq!(
            ModelPrice::new(f64::NAN, 1.0).unwrap_err().to_string(),
            "Prices must be valid numbers"
        );
        assert!(ModelPrice::new(0.01, 0.02).is_ok());
    }

    #[test]
    fn serializes_as_prompt_completion() {
        let json = serde_json::to_value(price(2.5, 10.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "prompt": 2.5, "completion": 10.0 }));
    }
}
