// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Price override record written by `tok price set`.
//!
//! Format: `{ "prices": { "<model>": { "prompt": 1.0, "completion": 2.0 } } }`.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tok_core::TokError;
use tok_cost::ModelPrice;
use tracing::warn;

use crate::file::{read_json, write_json_atomic};

/// File name of the override record inside the data directory.
pub const PRICES_FILE: &str = "config.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct PriceOverrideRecord {
    #[serde(default)]
    prices: IndexMap<String, ModelPrice>,
}

/// Reads and writes `<data_dir>/config.json`.
#[derive(Debug, Clone)]
pub struct PriceOverrideStore {
    path: PathBuf,
}

impl PriceOverrideStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(PRICES_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Saved overrides in the order they were first set.
    ///
    /// Entries with a non-positive or non-finite price are dropped with a
    /// warning. A missing or malformed file yields no overrides.
    pub fn load(&self) -> IndexMap<String, ModelPrice> {
        let record: PriceOverrideRecord = read_json(&self.path).unwrap_or_default();
        record
            .prices
            .into_iter()
            .filter(|(model, price)| {
                let valid = ModelPrice::new(price.prompt, price.completion).is_ok();
                if !valid {
                    warn!(model = %model, ?price, "ignoring invalid saved price");
                }
                valid
            })
            .collect()
    }

    pub fn save(&self, prices: &IndexMap<String, ModelPrice>) -> Result<(), TokError> {
        let record = PriceOverrideRecord {
            prices: prices.clone(),
        };
        write_json_atomic(&self.path, &record)
    }

    /// Add or replace one override and save the record.
    pub fn set(&self, model: &str, price: ModelPrice) -> Result<(), TokError> {
        let mut prices = self.load();
        prices.insert(model.to_string(), price);
        self.save(&prices)
    }
}
