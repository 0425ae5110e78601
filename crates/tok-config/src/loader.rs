// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tok.toml` > `~/.config/tok/tok.toml` > `/etc/tok/tok.toml`
//! with environment variable overrides via `TOK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TokConfig;

const SYSTEM_CONFIG: &str = "/etc/tok/tok.toml";
const LOCAL_CONFIG: &str = "tok.toml";

/// Sections whose keys can be set through `TOK_<SECTION>_<KEY>`.
const ENV_SECTIONS: &[&str] = &["log", "estimate", "storage"];

/// Config files consulted by [`load_config`], lowest precedence first.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("tok").join("tok.toml"));
    }
    paths.push(PathBuf::from(LOCAL_CONFIG));
    paths
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tok/tok.toml` (system-wide)
/// 3. `~/.config/tok/tok.toml` (user XDG config)
/// 4. `./tok.toml` (local directory)
/// 5. `TOK_*` environment variables
pub fn load_config() -> Result<TokConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string over the compiled defaults.
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TokConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TokConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TokConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TokConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    config_paths().into_iter().fold(
        Figment::new().merge(Serialized::defaults(TokConfig::default())),
        |figment, path| figment.merge(Toml::file(path)),
    )
    .merge(env_provider())
}

/// Map `TOK_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Only the first underscore after the section name splits, so
/// `TOK_ESTIMATE_DEFAULT_MODEL` becomes `estimate.default_model`.
fn env_provider() -> Env {
    Env::prefixed("TOK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        let mapped = ENV_SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key_str.to_string());
        mapped.into()
    })
}
