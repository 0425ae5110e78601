// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the estimators, the CLI and the MCP server.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Model used for cost calculation when the caller does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// How a token count was produced.
///
/// The display strings are part of the CLI and MCP output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum EstimationMethod {
    /// Character-division estimate.
    #[strum(serialize = "estimate")]
    #[serde(rename = "estimate")]
    Estimate,
    /// Counted by the real tokenizer.
    #[strum(serialize = "exact")]
    #[serde(rename = "exact")]
    Exact,
    /// Exact counting was requested but the tokenizer was unavailable, so the
    /// heuristic estimator produced the count.
    #[strum(serialize = "estimate (tiktoken unavailable)")]
    #[serde(rename = "estimate (tiktoken unavailable)")]
    Fallback,
}

/// A token count together with the method that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimation {
    pub tokens: usize,
    pub method: EstimationMethod,
}

/// How command results are rendered.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, line-oriented text.
    #[default]
    Human,
    /// Pretty-printed JSON on stdout.
    Json,
    /// Bordered table.
    Table,
}
