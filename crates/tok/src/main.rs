// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! tok - Token estimation and cost calculation for LLM prompts.
//!
//! This is the binary entry point for the `tok` CLI and MCP server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod cli;
mod config;
mod context;
mod estimate;
mod output;
mod price;
mod track;

use std::process::ExitCode;

use clap::Parser;
use tok_core::TokError;

use crate::cli::{Cli, Commands, PriceCommand, TrackCommand};
use crate::context::AppContext;
use crate::output::Printer;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match tok_config::load_and_validate(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            tok_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.log.level.to_lowercase()
    };
    init_tracing(&level);

    let ctx = AppContext::new(config, cli.config, cli.data_dir);
    match run(cli.command, &ctx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error[{}]: {e}", e.kind());
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, ctx: &AppContext) -> Result<(), TokError> {
    let printer = Printer::detect();
    match command {
        Commands::Estimate(args) => estimate::run_estimate(ctx, args, printer),
        Commands::Price(PriceCommand::List(args)) => price::run_price_list(ctx, args.format, printer),
        Commands::Price(PriceCommand::Set(args)) => price::run_price_set(ctx, args, printer),
        Commands::Track(TrackCommand::Summary(args)) => {
            track::run_track_summary(ctx, args.format, printer)
        }
        Commands::Track(TrackCommand::Reset) => track::run_track_reset(ctx, printer),
        Commands::Config(args) => config::run_config(ctx, args.format, printer),
        #[cfg(feature = "mcp-server")]
        Commands::Mcp => tok_mcp_server::serve_stdio(ctx.server_state()?).await,
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr; stdout carries command output and the MCP transport.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tok={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
