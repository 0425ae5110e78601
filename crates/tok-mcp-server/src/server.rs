// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MCP tool handlers.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tok_core::{DEFAULT_MODEL, ErrorKind, TokError};
use tok_cost::{CostCalculator, ModelPrice, PriceTable, SharedCostTracker};
use tok_estimate::{EstimateReport, Estimators};
use tok_storage::{PriceOverrideStore, SessionStore};
use tracing::{debug, info};

/// Text returned by `get_cost_summary` when nothing has been tracked.
pub const EMPTY_SUMMARY: &str =
    "No tracking data available. Use track=true with estimate_tokens to start tracking.";

/// Everything the tools operate on.
pub struct ServerState {
    pub estimators: Estimators,
    pub prices: PriceTable,
    pub tracker: SharedCostTracker,
    /// Where tracked usage is saved; `None` keeps the session in memory only.
    pub session_store: Option<SessionStore>,
    /// Where `set_model_price` saves overrides; `None` keeps them in memory only.
    pub price_store: Option<PriceOverrideStore>,
    /// Model used when `estimate_tokens` is called without one.
    pub default_model: String,
}

impl ServerState {
    /// In-memory state with built-in prices and no persistence.
    pub fn in_memory(estimators: Estimators) -> Self {
        Self {
            estimators,
            prices: PriceTable::default(),
            tracker: SharedCostTracker::default(),
            session_store: None,
            price_store: None,
            default_model: DEFAULT_MODEL.to_string(),
        }
    }
}

struct Shared {
    estimators: Estimators,
    prices: RwLock<PriceTable>,
    tracker: SharedCostTracker,
    session_store: Option<SessionStore>,
    price_store: Option<PriceOverrideStore>,
    default_model: String,
}

impl Shared {
    fn prices(&self) -> RwLockReadGuard<'_, PriceTable> {
        self.prices.read().unwrap_or_else(|p| p.into_inner())
    }

    fn prices_mut(&self) -> RwLockWriteGuard<'_, PriceTable> {
        self.prices.write().unwrap_or_else(|p| p.into_inner())
    }
}

/// Parameters of `estimate_tokens`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct EstimateTokensParams {
    /// Text to estimate tokens for
    pub text: String,
    /// Model for cost calculation (default: gpt-4o)
    #[serde(default)]
    pub model: Option<String>,
    /// Use exact token counting
    #[serde(default)]
    pub exact: bool,
    /// Add to cost tracking session
    #[serde(default)]
    pub track: bool,
}

/// Parameters of `set_model_price`.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetModelPriceParams {
    /// Model name
    pub model: String,
    /// Price per million prompt tokens
    pub prompt_price: f64,
    /// Price per million completion tokens
    pub completion_price: f64,
}

/// The tok MCP server. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct TokMcpServer {
    shared: Arc<Shared>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TokMcpServer {
    pub fn new(state: ServerState) -> Self {
        Self {
            shared: Arc::new(Shared {
                estimators: state.estimators,
                prices: RwLock::new(state.prices),
                tracker: state.tracker,
                session_store: state.session_store,
                price_store: state.price_store,
                default_model: state.default_model,
            }),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Estimate token count and prompt cost for text")]
    async fn estimate_tokens(
        &self,
        Parameters(params): Parameters<EstimateTokensParams>,
    ) -> Result<CallToolResult, McpError> {
        let model = params
            .model
            .unwrap_or_else(|| self.shared.default_model.clone());
        let built = {
            let prices = self.shared.prices();
            EstimateReport::build(
                &self.shared.estimators,
                &prices,
                &params.text,
                &model,
                params.exact,
            )
        };
        let mut report = match built {
            Ok(r) => r,
            Err(e) => return tool_failure(e),
        };

        if params.track
            && let Some(price) = report.price
        {
            if let Err(e) = self.track(&model, report.tokens as u64, &price) {
                return tool_failure(e);
            }
            report.tracked = true;
        }

        debug!(model = %report.model, tokens = report.tokens, tracked = report.tracked, "estimate_tokens");
        json_result(&report)
    }

    #[tool(description = "Get the cost tracking summary for this session")]
    async fn get_cost_summary(&self) -> Result<CallToolResult, McpError> {
        let summary = self.shared.tracker.summary();
        if summary.models.is_empty() {
            return Ok(CallToolResult::success(vec![Content::text(EMPTY_SUMMARY)]));
        }

        let models: Vec<_> = summary
            .model_breakdown
            .iter()
            .map(|line| {
                json!({
                    "model": line.model,
                    "tokens": line.tokens,
                    "cost": {
                        "prompt": CostCalculator::format_cost(line.cost.prompt),
                        "completion": CostCalculator::format_cost(line.cost.completion),
                        "total": CostCalculator::format_cost(line.cost.total),
                    },
                })
            })
            .collect();

        json_result(&json!({
            "duration_seconds": summary.duration,
            "total_cost": CostCalculator::format_cost(summary.total_cost),
            "total_tokens": summary.total_tokens,
            "models": models,
        }))
    }

    #[tool(description = "List all models with their prices per million tokens")]
    async fn list_models(&self) -> Result<CallToolResult, McpError> {
        let listing: serde_json::Map<String, serde_json::Value> = self
            .shared
            .prices()
            .list()
            .into_iter()
            .map(|(model, price)| {
                (
                    model,
                    json!({
                        "prompt_price_per_million": price.prompt,
                        "completion_price_per_million": price.completion,
                    }),
                )
            })
            .collect();
        json_result(&listing)
    }

    #[tool(description = "Set custom pricing for a model, per million tokens")]
    async fn set_model_price(
        &self,
        Parameters(params): Parameters<SetModelPriceParams>,
    ) -> Result<CallToolResult, McpError> {
        if params.model.is_empty() {
            return tool_failure(TokError::invalid_argument("Please provide a model name"));
        }
        let price = match ModelPrice::new(params.prompt_price, params.completion_price) {
            Ok(p) => p,
            Err(e) => return tool_failure(e),
        };

        // Held across the record update; the table changes only after it is saved.
        let mut prices = self.shared.prices_mut();
        if let Some(store) = &self.shared.price_store
            && let Err(e) = store.set(&params.model, price)
        {
            return tool_failure(e);
        }
        prices.set(params.model.clone(), price);
        drop(prices);
        info!(model = %params.model, prompt = price.prompt, completion = price.completion, "price set");

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Price set for {}:\n- Prompt: ${}/M tokens\n- Completion: ${}/M tokens",
            params.model, price.prompt, price.completion
        ))]))
    }

    #[tool(description = "Reset all cost tracking data")]
    async fn reset_tracker(&self) -> Result<CallToolResult, McpError> {
        let saved = self.shared.tracker.reset_then(|state| match &self.shared.session_store {
            Some(store) => store.save(state),
            None => Ok(()),
        });
        if let Err(e) = saved {
            return tool_failure(e);
        }
        info!("tracker reset");
        Ok(CallToolResult::success(vec![Content::text(
            "Cost tracking data has been reset.",
        )]))
    }
}

impl TokMcpServer {
    fn track(&self, model: &str, tokens: u64, price: &ModelPrice) -> Result<(), TokError> {
        self.shared
            .tracker
            .add_then(model, tokens, 0, price, |state| match &self.shared.session_store {
                Some(store) => store.save(state),
                None => Ok(()),
            })
    }

    /// Handle to the session tracker.
    pub fn tracker(&self) -> &SharedCostTracker {
        &self.shared.tracker
    }
}

#[tool_handler]
impl ServerHandler for TokMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut implementation = Implementation::from_build_env();
        implementation.name = "tok".to_string();
        implementation.version = env!("CARGO_PKG_VERSION").to_string();

        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info = implementation;
        info.instructions = Some(
            "Token estimation and cost calculation for LLM prompts. Use estimate_tokens \
             with track=true to accumulate a session, then get_cost_summary."
                .to_string(),
        );
        info
    }
}

/// Invalid input becomes an MCP `invalid_params` error; anything else is a
/// tool result flagged as an error.
fn tool_failure(e: TokError) -> Result<CallToolResult, McpError> {
    match e.kind() {
        ErrorKind::InvalidArgument => Err(McpError::invalid_params(e.to_string(), None)),
        _ => Ok(CallToolResult::error(vec![Content::text(format!(
            "Error: {e}"
        ))])),
    }
}

fn json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}
