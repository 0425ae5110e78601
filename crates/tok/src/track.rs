// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tok track summary` and `tok track reset` command implementations.

use tok_core::{OutputFormat, TokError};
use tok_cost::{CostCalculator, CostSummary};
use tracing::info;

use crate::context::AppContext;
use crate::output::{self, Printer};

/// Printed when the session has nothing in it.
pub const EMPTY_SESSION: &str = "No tracking data available. Use --track flag with estimate command.";

pub fn run_track_summary(
    ctx: &AppContext,
    format: OutputFormat,
    printer: Printer,
) -> Result<(), TokError> {
    let summary = ctx.sessions.load_tracker().summary();
    if summary.models.is_empty() {
        printer.warn(EMPTY_SESSION);
        return Ok(());
    }

    match format {
        OutputFormat::Json => output::print_json(&summary),
        OutputFormat::Table => {
            printer.line(summary_table(&summary));
            printer.line(format!(
                "Total Cost: {}",
                CostCalculator::format_cost(summary.total_cost)
            ));
            Ok(())
        }
        OutputFormat::Human => {
            printer.title("Cost Tracking Summary");
            printer.field("Duration", format!("{:.1}s", summary.duration));
            printer.field("Total Cost", CostCalculator::format_cost(summary.total_cost));
            printer.field(
                "Total Tokens",
                format!(
                    "{} (prompt {}, completion {})",
                    summary.total_tokens.total(),
                    summary.total_tokens.prompt,
                    summary.total_tokens.completion
                ),
            );
            printer.line("");
            printer.line("Model Breakdown:");
            for line in &summary.model_breakdown {
                printer.line(format!(
                    "  {}: {} tokens, {}",
                    line.model,
                    line.tokens.total(),
                    CostCalculator::format_cost(line.cost.total)
                ));
            }
            Ok(())
        }
    }
}

fn summary_table(summary: &CostSummary) -> comfy_table::Table {
    let mut table = output::table(&["Model", "Prompt Tokens", "Completion Tokens", "Cost"]);
    for line in &summary.model_breakdown {
        table.add_row(vec![
            line.model.clone(),
            line.tokens.prompt.to_string(),
            line.tokens.completion.to_string(),
            CostCalculator::format_cost(line.cost.total),
        ]);
    }
    table
}

/// Clear the session and save the empty state.
pub fn run_track_reset(ctx: &AppContext, printer: Printer) -> Result<(), TokError> {
    let mut tracker = ctx.sessions.load_tracker();
    tracker.reset();
    ctx.sessions.save(&tracker.export_state())?;
    info!("tracking session reset");
    printer.success("Cost tracking data reset");
    Ok(())
}
