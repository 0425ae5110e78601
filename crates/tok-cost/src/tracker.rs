// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session cost tracking.
//!
//! The tracker keeps running per-model totals of tokens and cost since the
//! session started. It never touches disk; callers persist it through
//! [`CostTracker::export_state`] and rebuild it with
//! [`CostTracker::from_state`] so a later process resumes the session,
//! including its start time.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculator::CostCalculator;
use crate::clock::{Clock, SystemClock};
use crate::pricing::ModelPrice;

/// Accumulated usage for one model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelTotals {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub prompt_cost: f64,
    pub completion_cost: f64,
}

impl ModelTotals {
    pub fn total_cost(&self) -> f64 {
        self.prompt_cost + self.completion_cost
    }
}

/// Prompt and completion token counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTotals {
    pub prompt: u64,
    pub completion: u64,
}

impl TokenTotals {
    pub fn total(&self) -> u64 {
        self.prompt + self.completion
    }
}

/// Prompt, completion and combined cost in USD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub prompt: f64,
    pub completion: f64,
    pub total: f64,
}

/// Per-model line of a [`CostSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBreakdown {
    pub model: String,
    pub tokens: TokenTotals,
    pub cost: CostBreakdown,
}

/// Point-in-time view of a tracking session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    /// Tracked models in first-seen order.
    pub models: Vec<String>,
    pub total_cost: f64,
    pub total_tokens: TokenTotals,
    /// Seconds since the session started.
    pub duration: f64,
    pub model_breakdown: Vec<ModelBreakdown>,
}

/// Persisted form of a tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerState {
    pub start_time: DateTime<Utc>,
    pub totals: IndexMap<String, ModelTotals>,
}

/// Running per-model token and cost totals for one session.
pub struct CostTracker {
    totals: IndexMap<String, ModelTotals>,
    start_time: DateTime<Utc>,
    clock: Arc<dyn Clock>,
}

impl CostTracker {
    /// Empty tracker timed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Empty tracker timed by `clock`. The session starts now.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            totals: IndexMap::new(),
            start_time: clock.now(),
            clock,
        }
    }

    /// Resume a session from its persisted state.
    pub fn from_state(state: TrackerState, clock: Arc<dyn Clock>) -> Self {
        Self {
            totals: state.totals,
            start_time: state.start_time,
            clock,
        }
    }

    /// Record usage for `model` priced at `price`.
    pub fn add(
        &mut self,
        model: &str,
        prompt_tokens: u64,
        completion_tokens: u64,
        price: &ModelPrice,
    ) {
        let entry = self.totals.entry(model.to_string()).or_default();
        entry.prompt_tokens += prompt_tokens;
        entry.completion_tokens += completion_tokens;
        entry.prompt_cost += CostCalculator::cost(prompt_tokens, price.prompt);
        entry.completion_cost += CostCalculator::cost(completion_tokens, price.completion);
        debug!(model, prompt_tokens, completion_tokens, "recorded usage");
    }

    /// Copy of the per-model totals.
    pub fn snapshot(&self) -> IndexMap<String, ModelTotals> {
        self.totals.clone()
    }

    /// Sum of prompt and completion cost across every model.
    pub fn grand_total(&self) -> f64 {
        self.totals.values().map(ModelTotals::total_cost).sum()
    }

    pub fn total_tokens(&self) -> TokenTotals {
        self.totals
            .values()
            .fold(TokenTotals::default(), |acc, t| TokenTotals {
                prompt: acc.prompt + t.prompt_tokens,
                completion: acc.completion + t.completion_tokens,
            })
    }

    /// Seconds elapsed since the session started, never negative.
    pub fn duration(&self) -> f64 {
        let elapsed = self.clock.now() - self.start_time;
        let micros = elapsed.num_microseconds().unwrap_or(i64::MAX);
        (micros as f64 / 1_000_000.0).max(0.0)
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Drop all totals and restart the session clock.
    pub fn reset(&mut self) {
        self.totals.clear();
        self.start_time = self.clock.now();
        debug!(start_time = %self.start_time, "tracker reset");
    }

    pub fn summary(&self) -> CostSummary {
        let model_breakdown = self
            .totals
            .iter()
            .map(|(model, t)| ModelBreakdown {
                model: model.clone(),
                tokens: TokenTotals {
                    prompt: t.prompt_tokens,
                    completion: t.completion_tokens,
                },
                cost: CostBreakdown {
                    prompt: t.prompt_cost,
                    completion: t.completion_cost,
                    total: t.total_cost(),
                },
            })
            .collect();

        CostSummary {
            models: self.totals.keys().cloned().collect(),
            total_cost: self.grand_total(),
            total_tokens: self.total_tokens(),
            duration: self.duration(),
            model_breakdown,
        }
    }

    /// State to persist. Round-trips exactly through [`Self::import_state`].
    pub fn export_state(&self) -> TrackerState {
        TrackerState {
            start_time: self.start_time,
            totals: self.totals.clone(),
        }
    }

    /// Replace this tracker's totals and start time with `state`.
    pub fn import_state(&mut self, state: TrackerState) {
        self.totals = state.totals;
        self.start_time = state.start_time;
    }
}

impl Default for CostTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CostTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostTracker")
            .field("totals", &self.totals)
            .field("start_time", &self.start_time)
            .finish_non_exhaustive()
    }
}
