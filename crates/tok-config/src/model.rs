// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for tok.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level tok configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Token estimation settings.
    #[serde(default)]
    pub estimate: EstimateConfig,

    /// Where the session and price override records live.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Static price overrides keyed by model name, per million tokens.
    ///
    /// Prices saved with `tok price set` take precedence over these.
    #[serde(default)]
    pub prices: BTreeMap<String, PriceConfig>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Token estimation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EstimateConfig {
    /// Model used for cost calculation when none is given.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Characters per token for the fast estimator.
    #[serde(default = "default_divisor")]
    pub divisor: f64,

    /// Count exactly with the tokenizer unless told otherwise.
    #[serde(default)]
    pub exact: bool,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            divisor: default_divisor(),
            exact: false,
        }
    }
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_divisor() -> f64 {
    4.0
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory holding `session.json` and `config.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    dirs::home_dir()
        .map(|p| p.join(".tok"))
        .unwrap_or_else(|| std::path::PathBuf::from(".tok"))
        .to_string_lossy()
        .into_owned()
}

/// A configured model price, USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PriceConfig {
    pub prompt: f64,
    pub completion: f64,
}
