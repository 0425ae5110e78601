// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON persistence for tok.
//!
//! Two records live in the data directory (`~/.tok` by default):
//! - `session.json`: the cost tracker state, so a new process resumes the session
//! - `config.json`: user price overrides saved by `tok price set`
//!
//! Writes are atomic (temp file + rename). A missing, unreadable or malformed
//! record is treated as "no prior state" and logged, never fatal.

pub mod file;
pub mod prices;
pub mod session;

pub use prices::{PRICES_FILE, PriceOverrideStore};
pub use session::{SESSION_FILE, SessionStore};
