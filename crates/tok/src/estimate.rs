// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tok estimate` command implementation.

use std::path::PathBuf;

use tok_core::{OutputFormat, TokError};
use tok_estimate::EstimateReport;
use tracing::info;

use crate::cli::EstimateArgs;
use crate::context::AppContext;
use crate::output::{self, Printer};

/// Run the `tok estimate` command.
///
/// With `--track`, the prompt tokens are added to the saved session. Models
/// without a price are reported with cost `N/A` and never tracked.
pub fn run_estimate(ctx: &AppContext, args: EstimateArgs, printer: Printer) -> Result<(), TokError> {
    let text = read_input(args.text, args.file)?;
    let model = args
        .model
        .unwrap_or_else(|| ctx.default_model().to_string());
    let exact = args.exact || ctx.config.estimate.exact;

    let estimators = ctx.estimators()?;
    let prices = ctx.price_table()?;
    let mut report = EstimateReport::build(&estimators, &prices, &text, &model, exact)?;

    if args.track {
        match report.price {
            Some(price) => {
                let mut tracker = ctx.sessions.load_tracker();
                tracker.add(&model, report.tokens as u64, 0, &price);
                ctx.sessions.save(&tracker.export_state())?;
                report.tracked = true;
                info!(model = %model, tokens = report.tokens, "usage tracked");
            }
            None => printer.warn(&format!("No pricing for {model}; usage was not tracked")),
        }
    }

    match args.output.format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => {
            let mut table = output::table(&["Field", "Value"]);
            table.add_row(vec!["Text length".to_string(), report.text_length.to_string()]);
            table.add_row(vec!["Tokens".to_string(), report.tokens.to_string()]);
            table.add_row(vec!["Method".to_string(), report.method.to_string()]);
            table.add_row(vec!["Model".to_string(), report.model.clone()]);
            table.add_row(vec!["Cost".to_string(), report.cost.clone()]);
            if report.tracked {
                table.add_row(vec!["Tracked".to_string(), "yes".to_string()]);
            }
            printer.line(table);
            Ok(())
        }
        OutputFormat::Human => {
            printer.title("Token Estimate");
            printer.field(
                "Text length",
                format!("{} characters", report.text_length),
            );
            printer.field("Tokens", format!("{} ({})", report.tokens, report.method));
            printer.field("Model", &report.model);
            printer.field("Cost", &report.cost);
            if report.tracked {
                printer.success("Added to tracking session");
            }
            Ok(())
        }
    }
}

/// The text argument, or the contents of the file it names with `--file`.
fn read_input(text: Option<String>, is_file: bool) -> Result<String, TokError> {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return Err(TokError::invalid_argument("Please provide text to estimate"));
    };
    if !is_file {
        return Ok(text);
    }

    let path = PathBuf::from(text);
    std::fs::read_to_string(&path).map_err(|source| TokError::FileNotFound { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tok_core::ErrorKind;

    #[test]
    fn missing_text_is_rejected() {
        let err = read_input(None, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.to_string(), "Please provide text to estimate");

        let err = read_input(Some(String::new()), false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn file_contents_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.txt");
        std::fs::write(&path, "from a file").unwrap();

        let text = read_input(Some(path.display().to_string()), true).unwrap();
        assert_eq!(text, "from a file");
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let err = read_input(Some("/definitely/not/here.txt".into()), true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(err.to_string(), "Could not read file: /definitely/not/here.txt");
    }
}
