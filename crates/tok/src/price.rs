// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tok price list` and `tok price set` command implementations.

use serde::Serialize;
use tok_core::{OutputFormat, TokError};
use tok_cost::{CostCalculator, ModelPrice};
use tracing::info;

use crate::cli::PriceSetArgs;
use crate::context::AppContext;
use crate::output::{self, Printer};

/// Structured `price set` output for `--format json`.
#[derive(Debug, Serialize)]
pub struct PriceSetResponse {
    pub model: String,
    pub price: ModelPrice,
}

pub fn run_price_list(ctx: &AppContext, format: OutputFormat, printer: Printer) -> Result<(), TokError> {
    let prices = ctx.price_table()?.list();

    match format {
        OutputFormat::Json => output::print_json(&prices),
        OutputFormat::Table => {
            let mut table = output::table(&["Model", "Prompt", "Completion"]);
            for (model, price) in &prices {
                table.add_row(vec![
                    model.clone(),
                    CostCalculator::format_price(price.prompt),
                    CostCalculator::format_price(price.completion),
                ]);
            }
            printer.line(table);
            Ok(())
        }
        OutputFormat::Human => {
            let title = "Model Pricing (per million tokens)";
            printer.title(title);
            for (model, price) in &prices {
                printer.line(format!(
                    "{model:<20} Prompt: ${:<6} | Completion: ${}",
                    price.prompt, price.completion
                ));
            }
            Ok(())
        }
    }
}

/// Validate both prices, then update the override record.
///
/// Nothing is written unless both prices parse and are positive.
pub fn run_price_set(ctx: &AppContext, args: PriceSetArgs, printer: Printer) -> Result<(), TokError> {
    let price = parse_prices(args.input.as_deref(), args.output.as_deref())?;
    if args.model.is_empty() {
        return Err(TokError::invalid_argument("Please provide a model name"));
    }

    ctx.price_overrides.set(&args.model, price)?;
    info!(model = %args.model, prompt = price.prompt, completion = price.completion, "price override saved");

    match args.format.format {
        OutputFormat::Json => output::print_json(&PriceSetResponse {
            model: args.model,
            price,
        }),
        OutputFormat::Human | OutputFormat::Table => {
            printer.success(&format!("Price set for {}", args.model));
            printer.line(format!("  Input: ${}/M tokens", price.prompt));
            printer.line(format!("  Output: ${}/M tokens", price.completion));
            Ok(())
        }
    }
}

fn parse_prices(input: Option<&str>, output: Option<&str>) -> Result<ModelPrice, TokError> {
    let (Some(input), Some(output)) = (input, output) else {
        return Err(TokError::invalid_argument(
            "Please provide both --input and --output prices",
        ));
    };
    let (Ok(prompt), Ok(completion)) = (input.trim().parse::<f64>(), output.trim().parse::<f64>())
    else {
        return Err(TokError::invalid_argument("Prices must be valid numbers"));
    };
    ModelPrice::new(prompt, completion)
}
