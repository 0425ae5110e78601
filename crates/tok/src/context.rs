// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolved configuration and stores shared by every command.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tok_config::TokConfig;
use tok_core::TokError;
use tok_cost::{ModelPrice, PriceTable};
use tok_estimate::Estimators;
use tok_storage::{PriceOverrideStore, SessionStore};
use tracing::debug;

pub struct AppContext {
    pub config: TokConfig,
    /// Explicit `--config` file, if any.
    pub config_path: Option<PathBuf>,
    pub data_dir: PathBuf,
    pub sessions: SessionStore,
    pub price_overrides: PriceOverrideStore,
}

impl AppContext {
    /// `data_dir` overrides `storage.data_dir` from the config.
    pub fn new(config: TokConfig, config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir.unwrap_or_else(|| expand_home(&config.storage.data_dir));
        debug!(data_dir = %data_dir.display(), "resolved data directory");
        Self {
            sessions: SessionStore::new(&data_dir),
            price_overrides: PriceOverrideStore::new(&data_dir),
            config,
            config_path,
            data_dir,
        }
    }

    /// Built-in prices, then `[prices]` from the config, then saved overrides.
    pub fn price_table(&self) -> Result<PriceTable, TokError> {
        let mut initial = configured_prices(&self.config)?;
        for (model, price) in self.price_overrides.load() {
            initial.insert(model, price);
        }
        Ok(PriceTable::new(Some(initial)))
    }

    pub fn estimators(&self) -> Result<Estimators, TokError> {
        Estimators::new(self.config.estimate.divisor)
    }

    pub fn default_model(&self) -> &str {
        &self.config.estimate.default_model
    }

    #[cfg(feature = "mcp-server")]
    pub fn server_state(&self) -> Result<tok_mcp_server::ServerState, TokError> {
        Ok(tok_mcp_server::ServerState {
            estimators: self.estimators()?,
            prices: self.price_table()?,
            tracker: tok_cost::SharedCostTracker::new(self.sessions.load_tracker()),
            session_store: Some(self.sessions.clone()),
            price_store: Some(self.price_overrides.clone()),
            default_model: self.default_model().to_string(),
        })
    }
}

fn configured_prices(config: &TokConfig) -> Result<IndexMap<String, ModelPrice>, TokError> {
    config
        .prices
        .iter()
        .map(|(model, p)| Ok((model.clone(), ModelPrice::new(p.prompt, p.completion)?)))
        .collect()
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    Path::new(path).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tok_config::PriceConfig;

    fn context_in(dir: &Path, config: TokConfig) -> AppContext {
        AppContext::new(config, None, Some(dir.to_path_buf()))
    }

    #[test]
    fn data_dir_flag_wins_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path(), TokConfig::default());
        assert_eq!(ctx.data_dir, dir.path());
        assert_eq!(ctx.sessions.path(), dir.path().join("session.json"));
    }

    #[test]
    fn tilde_is_expanded() {
        let expanded = expand_home("~/.tok");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join(".tok"));
        }
        assert_eq!(expand_home("/var/tok"), PathBuf::from("/var/tok"));
    }

    #[test]
    fn saved_overrides_win_over_config_prices() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TokConfig::default();
        config.prices.insert(
            "custom".into(),
            PriceConfig {
                prompt: 1.0,
                completion: 2.0,
            },
        );
        config.prices.insert(
            "gpt-4o".into(),
            PriceConfig {
                prompt: 3.0,
                completion: 4.0,
            },
        );
        let ctx = context_in(dir.path(), config);
        ctx.price_overrides
            .set("custom", ModelPrice::new(5.0, 6.0).unwrap())
            .unwrap();

        let table = ctx.price_table().unwrap();
        assert_eq!(table.get("custom"), Some(ModelPrice::new(5.0, 6.0).unwrap()));
        assert_eq!(table.get("gpt-4o"), Some(ModelPrice::new(3.0, 4.0).unwrap()));
        assert!(table.has("claude-3-haiku"));
    }
}
