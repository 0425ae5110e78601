// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config errors as miette diagnostics.
//!
//! Figment extraction errors are turned into [`ConfigError`]s that point at
//! the offending key in the TOML file and, for unknown keys, suggest the
//! closest valid key by Jaro-Winkler similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::path::Path;

use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// Catches typos like `divsor` -> `divisor` and `data_dri` -> `data_dir`.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A TOML file's name and contents, kept for span lookup.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read `path` if it exists.
    pub fn read(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let name = std::path::absolute(path)
            .unwrap_or_else(|_| path.to_path_buf())
            .display()
            .to_string();
        Some(Self { name, content })
    }
}

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(tok::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Closest valid key, if any is similar enough.
        suggestion: Option<String>,
        /// Comma-separated keys accepted by the enclosing section.
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(tok::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A required key is missing, e.g. `completion` in a `[prices]` entry.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(tok::config::missing_key),
        help("add `{key} = <value>` to your tok.toml")
    )]
    MissingKey { key: String },

    /// A value parsed but is out of range.
    #[error("invalid value for `{key}`: {message}")]
    #[diagnostic(code(tok::config::validation))]
    Validation { key: String, message: String },

    /// Anything else figment reports.
    #[error("configuration error: {0}")]
    #[diagnostic(code(tok::config::other))]
    Other(String),
}

impl ConfigError {
    pub fn validation(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            key: key.into(),
            message: message.into(),
        }
    }
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` (which may hold several errors) into diagnostics.
pub fn figment_to_config_errors(err: figment::Error, sources: &[SourceFile]) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let path: Vec<String> = error.path.clone();
            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    let (span, src) = locate(&error, &path, field, sources);
                    ConfigError::UnknownKey {
                        key: field.clone(),
                        suggestion: suggest_key(field, expected),
                        valid_keys: expected.join(", "),
                        span,
                        src,
                    }
                }
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: qualified(&path, field),
                },
                Kind::InvalidType(actual, expected) => {
                    let (section, field) = match path.split_last() {
                        Some((last, rest)) => (rest.to_vec(), last.clone()),
                        None => (Vec::new(), String::new()),
                    };
                    let (span, src) = locate(&error, &section, &field, sources);
                    ConfigError::InvalidType {
                        key: path.join("."),
                        detail: format!("found {actual}, expected {expected}"),
                        expected: expected.to_string(),
                        span,
                        src,
                    }
                }
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

fn qualified(path: &[String], field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{field}", path.join("."))
    }
}

/// Span and source for `field` under `section`, if the error came from a
/// file we have the contents of.
fn locate(
    error: &figment::error::Error,
    section: &[String],
    field: &str,
    sources: &[SourceFile],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let Some(origin) = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        })
    else {
        return (None, None);
    };

    sources
        .iter()
        .find(|s| s.name == origin)
        .and_then(|s| {
            let offset = find_key_offset(&s.content, section, field)?;
            Some((
                Some(SourceSpan::new(offset.into(), field.len())),
                Some(NamedSource::new(&s.name, s.content.clone())),
            ))
        })
        .unwrap_or((None, None))
}

/// Byte offset of `field` in TOML `content`, searching after the header of
/// `section` (e.g. `[estimate]`, or `[prices."gpt-4o"]` for a two-part path).
/// Top-level fields are searched from the start.
pub fn find_key_offset(content: &str, section: &[String], field: &str) -> Option<usize> {
    let start = match section {
        [] => 0,
        [table] => header_end(content, &format!("[{table}]"))?,
        [table, key, ..] => header_end(content, &format!("[{table}.\"{key}\"]"))
            .or_else(|| header_end(content, &format!("[{table}.{key}]")))?,
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') {
            break;
        }
        if let Some(after) = trimmed.strip_prefix(field)
            && after.trim_start().starts_with('=')
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }
    None
}

fn header_end(content: &str, header: &str) -> Option<usize> {
    content.find(header).map(|pos| pos + header.len())
}

/// Closest key in `valid_keys` above the similarity threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render diagnostics as they would appear on a terminal.
pub fn render_to_string(errors: &[ConfigError]) -> String {
    let handler = GraphicalReportHandler::new();
    let mut out = String::new();
    for error in errors {
        let mut buf = String::new();
        if handler.render_report(&mut buf, error as &dyn Diagnostic).is_ok() {
            out.push_str(&buf);
        } else {
            out.push_str(&format!("Error: {error}\n"));
        }
    }
    out
}

/// Render diagnostics to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    eprint!("{}", render_to_string(errors));
}
