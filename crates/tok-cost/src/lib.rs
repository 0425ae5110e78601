// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pricing, cost calculation, and session cost tracking for tok.
//!
//! This crate provides:
//! - **Price table**: model to per-million-token price mapping with built-in defaults
//! - **Cost calculator**: pure arithmetic on token counts and prices
//! - **Cost tracker**: per-model running totals with an export/import contract for persistence

pub mod calculator;
pub mod clock;
pub mod pricing;
pub mod shared;
pub mod tracker;

pub use calculator::CostCalculator;
pub use clock::{Clock, ManualClock, SystemClock};
pub use pricing::{DEFAULT_PRICES, ModelPrice, PriceTable};
pub use shared::SharedCostTracker;
pub use tracker::{
    CostBreakdown, CostSummary, CostTracker, ModelBreakdown, ModelTotals, TokenTotals,
    TrackerState,
};
