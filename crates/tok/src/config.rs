// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tok config` command implementation.

use std::path::PathBuf;

use serde::Serialize;
use tok_core::{OutputFormat, TokError};

use crate::context::AppContext;
use crate::output::{self, Printer};

/// A TOML file tok reads configuration from.
#[derive(Debug, Serialize)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub exists: bool,
}

/// Structured `tok config` output for `--format json`.
#[derive(Debug, Serialize)]
pub struct ConfigReport {
    /// Price override record written by `tok price set`.
    pub path: PathBuf,
    pub exists: bool,
    pub data_dir: PathBuf,
    pub sources: Vec<ConfigSource>,
    pub default_model: String,
    pub divisor: f64,
}

impl ConfigReport {
    pub fn collect(ctx: &AppContext) -> Self {
        let candidates = match &ctx.config_path {
            Some(path) => vec![path.clone()],
            None => tok_config::config_paths(),
        };
        Self {
            path: ctx.price_overrides.path().to_path_buf(),
            exists: ctx.price_overrides.exists(),
            data_dir: ctx.data_dir.clone(),
            sources: candidates
                .into_iter()
                .map(|path| ConfigSource {
                    exists: path.is_file(),
                    path,
                })
                .collect(),
            default_model: ctx.config.estimate.default_model.clone(),
            divisor: ctx.config.estimate.divisor,
        }
    }
}

pub fn run_config(ctx: &AppContext, format: OutputFormat, printer: Printer) -> Result<(), TokError> {
    let report = ConfigReport::collect(ctx);

    if format == OutputFormat::Json {
        return output::print_json(&report);
    }

    printer.title("Configuration:");
    printer.field("Path", report.path.display());
    printer.field("Exists", yes_no(report.exists));
    printer.field("Data dir", report.data_dir.display());
    printer.field("Default model", &report.default_model);
    printer.field("Divisor", report.divisor);
    printer.line("");
    printer.line("Config sources:");
    for source in &report.sources {
        printer.line(format!("  {} {}", yes_no(source.exists), source.path.display()));
    }
    Ok(())
}

fn yes_no(exists: bool) -> &'static str {
    if exists { "✓ Yes" } else { "✗ No" }
}
