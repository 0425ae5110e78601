// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Length/divisor token estimate: `ceil(chars / divisor)`.

use tok_core::{TokError, TokenEstimator};

/// Characters per token assumed when no divisor is configured.
pub const DEFAULT_DIVISOR: f64 = 4.0;

/// Cheap estimator that divides the character count by a fixed divisor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharDivEstimator {
    divisor: f64,
}

impl CharDivEstimator {
    /// Create an estimator with the given divisor.
    ///
    /// The divisor must be finite and strictly positive.
    pub fn new(divisor: f64) -> Result<Self, TokError> {
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(TokError::invalid_argument(format!(
                "divisor must be a positive number, got {divisor}"
            )));
        }
        Ok(Self { divisor })
    }

    /// The configured divisor.
    pub fn divisor(&self) -> f64 {
        self.divisor
    }

    /// Count tokens. Infallible; the trait method wraps this.
    pub fn count(&self, text: &str) -> usize {
        let chars = text.chars().count();
        if chars == 0 {
            return 0;
        }
        (chars as f64 / self.divisor).ceil() as usize
    }
}

impl Default for CharDivEstimator {
    fn default() -> Self {
        Self {
            divisor: DEFAULT_DIVISOR,
        }
    }
}

impl TokenEstimator for CharDivEstimator {
    fn name(&self) -> &str {
        "char-div"
    }

    fn estimate(&self, text: &str) -> Result<usize, TokError> {
        Ok(self.count(text))
    }
}
