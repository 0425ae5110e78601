// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering helpers for human, JSON and table output.
//!
//! Results go to stdout; warnings go to stderr. Colors are used only when
//! stdout is a terminal.

use std::io::IsTerminal;

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use tok_core::TokError;

#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn detect() -> Self {
        Self {
            color: std::io::stdout().is_terminal(),
        }
    }

    /// Blue title followed by a rule sized to the title.
    pub fn title(&self, title: &str) {
        if self.color {
            println!("{}", title.blue().bold());
        } else {
            println!("{title}");
        }
        println!("{}", rule(title));
    }

    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        let value = value.to_string();
        if self.color {
            println!("{label}: {}", value.yellow());
        } else {
            println!("{label}: {value}");
        }
    }

    pub fn success(&self, message: &str) {
        if self.color {
            println!("{} {message}", "✓".green());
        } else {
            println!("✓ {message}");
        }
    }

    pub fn warn(&self, message: &str) {
        if std::io::stderr().is_terminal() {
            eprintln!("{} {}", "⚠".yellow(), message.yellow());
        } else {
            eprintln!("⚠ {message}");
        }
    }

    pub fn line(&self, text: impl std::fmt::Display) {
        println!("{text}");
    }
}

/// Rule of `─` as wide as the title plus ten, at most fifty.
pub fn rule(title: &str) -> String {
    "─".repeat((title.chars().count() + 10).min(50))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), TokError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| TokError::Processing(format!("failed to serialize output: {e}")))?;
    println!("{text}");
    Ok(())
}

/// Table with the house style applied.
pub fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}
