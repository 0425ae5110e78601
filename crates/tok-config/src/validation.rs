// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the constraints serde cannot express: positive divisor and prices,
//! non-empty names and paths, and a known log level.

use crate::diagnostic::ConfigError;
use crate::model::TokConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first.
pub fn validate_config(config: &TokConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.log.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(
            "log.level",
            format!(
                "`{}` is not a log level; expected one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }

    let divisor = config.estimate.divisor;
    if !divisor.is_finite() || divisor <= 0.0 {
        errors.push(ConfigError::validation(
            "estimate.divisor",
            format!("must be a positive number, got {divisor}"),
        ));
    }

    if config.estimate.default_model.trim().is_empty() {
        errors.push(ConfigError::validation(
            "estimate.default_model",
            "must not be empty",
        ));
    }

    if config.storage.data_dir.trim().is_empty() {
        errors.push(ConfigError::validation("storage.data_dir", "must not be empty"));
    }

    for (model, price) in &config.prices {
        if model.trim().is_empty() {
            errors.push(ConfigError::validation("prices", "model name must not be empty"));
        }
        for (side, value) in [("prompt", price.prompt), ("completion", price.completion)] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(ConfigError::validation(
                    format!("prices.\"{model}\".{side}"),
                    format!("must be a positive number, got {value}"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
