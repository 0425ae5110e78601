// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exact token counting with the OpenAI BPE vocabulary.

use std::fmt;

use tiktoken_rs::CoreBPE;
use tok_core::{TokError, TokenEstimator};

/// Model whose encoding is loaded for exact counts.
pub const ENCODING_MODEL: &str = "gpt-4o-mini";

/// Estimator backed by `tiktoken-rs`.
///
/// The encoder is loaded by [`TokenEstimator::initialize`] and dropped by
/// [`TokenEstimator::dispose`].
pub struct TiktokenEstimator {
    model: String,
    bpe: Option<CoreBPE>,
}

impl TiktokenEstimator {
    pub fn new() -> Self {
        Self::for_model(ENCODING_MODEL)
    }

    /// Use the encoding of a different model.
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            bpe: None,
        }
    }
}

impl Default for TiktokenEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TiktokenEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TiktokenEstimator")
            .field("model", &self.model)
            .field("loaded", &self.bpe.is_some())
            .finish()
    }
}

impl TokenEstimator for TiktokenEstimator {
    fn name(&self) -> &str {
        "tiktoken"
    }

    fn estimate(&self, text: &str) -> Result<usize, TokError> {
        let bpe = self
            .bpe
            .as_ref()
            .ok_or_else(|| TokError::not_ready(self.name()))?;
        Ok(bpe.encode_ordinary(text).len())
    }

    fn initialize(&mut self) -> Result<(), TokError> {
        if self.bpe.is_some() {
            return Ok(());
        }
        let bpe = tiktoken_rs::get_bpe_from_model(&self.model).map_err(|e| {
            TokError::EstimatorUnavailable {
                estimator: "tiktoken".into(),
                message: format!("no encoding for model {}: {e}", self.model),
            }
        })?;
        self.bpe = Some(bpe);
        Ok(())
    }

    fn dispose(&mut self) {
        self.bpe = None;
    }

    fn is_ready(&self) -> bool {
        self.bpe.is_some()
    }
}
