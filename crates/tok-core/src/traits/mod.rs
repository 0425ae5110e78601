// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions implemented by pluggable tok components.

pub mod estimator;

pub use estimator::TokenEstimator;
