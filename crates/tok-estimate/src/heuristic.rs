// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multi-feature heuristic estimator, used when the real tokenizer is not
//! available.
//!
//! The feature score `1.3·words + 0.3·punctuation + 0.5·number_groups +
//! 0.1·uppercase` is averaged with a `chars / 3.5` estimate and rounded up.

use std::sync::LazyLock;

use regex::Regex;
use tok_core::{TokError, TokenEstimator};

const WORD_WEIGHT: f64 = 1.3;
const PUNCTUATION_WEIGHT: f64 = 0.3;
const NUMBER_GROUP_WEIGHT: f64 = 0.5;
const UPPERCASE_WEIGHT: f64 = 0.1;
const CHARS_PER_TOKEN: f64 = 3.5;

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{P}").expect("punctuation pattern is valid"));

static NUMBER_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("number pattern is valid"));

/// Raw feature counts for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextFeatures {
    pub words: usize,
    pub punctuation: usize,
    pub number_groups: usize,
    pub uppercase: usize,
    pub chars: usize,
}

impl TextFeatures {
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            punctuation: PUNCTUATION.find_iter(text).count(),
            number_groups: NUMBER_GROUP.find_iter(text).count(),
            uppercase: text.chars().filter(|c| c.is_uppercase()).count(),
            chars: text.chars().count(),
        }
    }

    fn token_estimate(&self) -> usize {
        let feature_score = WORD_WEIGHT * self.words as f64
            + PUNCTUATION_WEIGHT * self.punctuation as f64
            + NUMBER_GROUP_WEIGHT * self.number_groups as f64
            + UPPERCASE_WEIGHT * self.uppercase as f64;
        let char_estimate = self.chars as f64 / CHARS_PER_TOKEN;
        ((feature_score + char_estimate) / 2.0).ceil() as usize
    }
}

/// Heuristic estimator with an explicit initialize/dispose lifecycle.
///
/// Initialization does no work; the lifecycle exists so this estimator can
/// stand in for the tokenizer-backed one without callers special-casing it.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEstimator {
    ready: bool,
}

impl HeuristicEstimator {
    /// A new, not-yet-initialized estimator.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new estimator that has already been initialized.
    pub fn ready() -> Self {
        Self { ready: true }
    }
}

impl TokenEstimator for HeuristicEstimator {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn estimate(&self, text: &str) -> Result<usize, TokError> {
        if !self.ready {
            return Err(TokError::not_ready(self.name()));
        }
        Ok(TextFeatures::of(text).token_estimate())
    }

    fn initialize(&mut self) -> Result<(), TokError> {
        self.ready = true;
        Ok(())
    }

    fn dispose(&mut self) {
        self.ready = false;
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
