// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tok_core::OutputFormat;

/// tok - Token estimation and cost calculation for LLM prompts.
#[derive(Parser, Debug)]
#[command(name = "tok", version, about, long_about = None)]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read configuration from this TOML file instead of the default locations.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the session and price override records.
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate tokens and prompt cost for text.
    Estimate(EstimateArgs),
    /// Show or change model prices.
    #[command(subcommand)]
    Price(PriceCommand),
    /// Inspect or reset the cost tracking session.
    #[command(subcommand)]
    Track(TrackCommand),
    /// Show where tok reads and writes its files.
    Config(FormatArgs),
    /// Run the MCP server on stdio.
    #[cfg(feature = "mcp-server")]
    Mcp,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct FormatArgs {
    /// Output format.
    #[arg(long, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Text to estimate, or a path when --file is given.
    pub text: Option<String>,

    /// Model used for cost calculation [default: from config]
    #[arg(short, long)]
    pub model: Option<String>,

    /// Count tokens with the model tokenizer instead of estimating.
    #[arg(short, long)]
    pub exact: bool,

    /// Treat TEXT as a file path and estimate its contents.
    #[arg(short, long)]
    pub file: bool,

    /// Add the prompt tokens to the tracking session.
    #[arg(long)]
    pub track: bool,

    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Subcommand, Debug)]
pub enum PriceCommand {
    /// List every known model with its prices per million tokens.
    List(FormatArgs),
    /// Set prices for a model, in dollars per million tokens.
    Set(PriceSetArgs),
}

#[derive(Args, Debug)]
pub struct PriceSetArgs {
    /// Model name.
    pub model: String,

    /// Prompt (input) price per million tokens.
    #[arg(
        short = 'i',
        long = "input",
        visible_alias = "prompt",
        visible_short_alias = 'p',
        allow_hyphen_values = true,
        value_name = "PRICE"
    )]
    pub input: Option<String>,

    /// Completion (output) price per million tokens.
    #[arg(
        short = 'o',
        long = "output",
        visible_alias = "completion",
        visible_short_alias = 'c',
        allow_hyphen_values = true,
        value_name = "PRICE"
    )]
    pub output: Option<String>,

    #[command(flatten)]
    pub format: FormatArgs,
}

#[derive(Subcommand, Debug)]
pub enum TrackCommand {
    /// Show tokens and cost accumulated in the session.
    Summary(FormatArgs),
    /// Clear the session.
    Reset,
}
