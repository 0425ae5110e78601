// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MCP server for tok.
//!
//! Exposes five tools over stdio: `estimate_tokens`, `get_cost_summary`,
//! `list_models`, `set_model_price` and `reset_tracker`. State lives for the
//! life of the process; when stores are configured, tracked usage and price
//! overrides are also written to the data directory after every change.

pub mod server;

use rmcp::ServiceExt;
use tok_core::TokError;
use tracing::info;

pub use server::{
    EMPTY_SUMMARY, EstimateTokensParams, ServerState, SetModelPriceParams, TokMcpServer,
};

/// Serve `state` over stdin/stdout until the client disconnects.
pub async fn serve_stdio(state: ServerState) -> Result<(), TokError> {
    let server = TokMcpServer::new(state);
    info!("starting MCP server on stdio");

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| TokError::Processing(format!("MCP server failed to start: {e}")))?;

    service
        .waiting()
        .await
        .map_err(|e| TokError::Processing(format!("MCP server stopped unexpectedly: {e}")))?;

    info!("MCP client disconnected");
    Ok(())
}
