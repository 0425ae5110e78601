// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token estimator trait implemented by every counting strategy.

use crate::error::TokError;

/// A strategy that turns text into a token count.
///
/// Estimators that hold external resources (a loaded tokenizer, for example)
/// override the lifecycle hooks. `estimate` on such an estimator fails with
/// [`TokError::NotReady`] until `initialize` succeeds and again after
/// `dispose`.
pub trait TokenEstimator: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Count the tokens in `text`.
    fn estimate(&self, text: &str) -> Result<usize, TokError>;

    /// Acquire whatever the estimator needs before `estimate` can be called.
    fn initialize(&mut self) -> Result<(), TokError> {
        Ok(())
    }

    /// Release resources. Further `estimate` calls fail until re-initialized.
    fn dispose(&mut self) {}

    /// Whether `estimate` can currently be called.
    fn is_ready(&self) -> bool {
        true
    }
}
