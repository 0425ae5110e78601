// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for tok.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, `TOK_*` environment variable overrides, and
//! miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use tok_config::load_and_validate;
//!
//! let config = load_and_validate(None).expect("config errors");
//! println!("default model: {}", config.estimate.default_model);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, SourceFile, render_errors};
pub use loader::{config_paths, load_config, load_config_from_path, load_config_from_str};
pub use model::{EstimateConfig, LogConfig, PriceConfig, StorageConfig, TokConfig};

/// Load and validate configuration.
///
/// With `path`, only that file (plus env overrides) is read; otherwise the
/// XDG hierarchy is used. Returns every problem found rather than the first.
pub fn load_and_validate(path: Option<&Path>) -> Result<TokConfig, Vec<ConfigError>> {
    let (loaded, sources) = match path {
        Some(p) => (
            loader::load_config_from_path(p),
            SourceFile::read(p).into_iter().collect(),
        ),
        None => (loader::load_config(), collect_toml_sources()),
    };

    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources)),
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<TokConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = [SourceFile::new("<inline>", toml_content)];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Contents of every config file in the hierarchy that exists.
fn collect_toml_sources() -> Vec<SourceFile> {
    config_paths()
        .iter()
        .filter_map(|p| SourceFile::read(p))
        .collect()
}
