// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token estimators for tok.
//!
//! Three [`TokenEstimator`] implementations live here:
//! - [`CharDivEstimator`]: `ceil(chars / divisor)`, the default fast path.
//! - [`TiktokenEstimator`]: exact counts with the OpenAI BPE vocabulary.
//! - [`HeuristicEstimator`]: a feature-weighted guess used when the exact
//!   path is unavailable.
//!
//! [`Estimators`] ties them together and decides which one answers a request;
//! [`EstimateReport`] prices the result for a model.

pub mod char_div;
pub mod heuristic;
pub mod report;
pub mod tiktoken;

use std::sync::Mutex;

use tok_core::{Estimation, EstimationMethod, TokError, TokenEstimator};
use tracing::{debug, warn};

pub use char_div::{CharDivEstimator, DEFAULT_DIVISOR};
pub use heuristic::{HeuristicEstimator, TextFeatures};
pub use report::{EstimateReport, NO_PRICE};
pub use tiktoken::TiktokenEstimator;

/// Chooses an estimator per request.
///
/// Non-exact requests use the character divisor. Exact requests go to the
/// precise estimator, which is initialized on first use; if it cannot be
/// initialized or fails, the heuristic estimator answers instead and the
/// result is tagged [`EstimationMethod::Fallback`].
pub struct Estimators {
    fast: CharDivEstimator,
    precise: Mutex<Box<dyn TokenEstimator>>,
    fallback: HeuristicEstimator,
}

impl Estimators {
    /// Fast path with the given divisor, tiktoken as the precise path.
    pub fn new(divisor: f64) -> Result<Self, TokError> {
        Self::with_precise(divisor, Box::new(TiktokenEstimator::new()))
    }

    /// Fast path with the given divisor and a caller-supplied precise path.
    pub fn with_precise(
        divisor: f64,
        precise: Box<dyn TokenEstimator>,
    ) -> Result<Self, TokError> {
        let mut fallback = HeuristicEstimator::new();
        fallback.initialize()?;
        Ok(Self {
            fast: CharDivEstimator::new(divisor)?,
            precise: Mutex::new(precise),
            fallback,
        })
    }

    /// The character-division estimator used for non-exact requests.
    pub fn fast(&self) -> &CharDivEstimator {
        &self.fast
    }

    /// Estimate `text`, exactly if requested and possible.
    pub fn estimate(&self, text: &str, exact: bool) -> Result<Estimation, TokError> {
        if !exact {
            return Ok(Estimation {
                tokens: self.fast.count(text),
                method: EstimationMethod::Estimate,
            });
        }

        match self.estimate_precise(text) {
            Ok(tokens) => Ok(Estimation {
                tokens,
                method: EstimationMethod::Exact,
            }),
            Err(e) => {
                warn!(error = %e, "exact token count unavailable, falling back to heuristic");
                Ok(Estimation {
                    tokens: self.fallback.estimate(text)?,
                    method: EstimationMethod::Fallback,
                })
            }
        }
    }

    fn estimate_precise(&self, text: &str) -> Result<usize, TokError> {
        let mut precise = self
            .precise
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !precise.is_ready() {
            debug!(estimator = precise.name(), "initializing precise estimator");
            precise.initialize()?;
        }
        precise.estimate(text)
    }
}

impl Drop for Estimators {
    fn drop(&mut self) {
        let precise = self
            .precise
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        precise.dispose();
    }
}

impl std::fmt::Debug for Estimators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Estimators")
            .field("fast", &self.fast)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tracing_test::traced_test;

    /// Precise estimator that never loads.
    struct Broken;

    impl TokenEstimator for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn estimate(&self, _text: &str) -> Result<usize, TokError> {
            Err(TokError::not_ready("broken"))
        }

        fn initialize(&mut self) -> Result<(), TokError> {
            Err(TokError::EstimatorUnavailable {
                estimator: "broken".into(),
                message: "no vocabulary".into(),
            })
        }

        fn is_ready(&self) -> bool {
            false
        }
    }

    /// Precise estimator that records its lifecycle.
    struct Counting {
        ready: bool,
        inits: Arc<AtomicUsize>,
        disposed: Arc<AtomicBool>,
    }

    impl TokenEstimator for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn estimate(&self, text: &str) -> Result<usize, TokError> {
            Ok(text.split_whitespace().count())
        }

        fn initialize(&mut self) -> Result<(), TokError> {
            self.inits.fetch_add(1, Ordering::SeqCst);
            self.ready = true;
            Ok(())
        }

        fn dispose(&mut self) {
            self.ready = false;
            self.disposed.store(true, Ordering::SeqCst);
        }

        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    #[test]
    fn non_exact_uses_char_divisor() {
        let est = Estimators::with_precise(4.0, Box::new(Broken)).unwrap();
        let result = est.estimate("Hello world", false).unwrap();
        assert_eq!(result.tokens, 3);
        assert_eq!(result.method, EstimationMethod::Estimate);
    }

    #[test]
    #[traced_test]
    fn exact_falls_back_to_heuristic() {
        let est = Estimators::with_precise(4.0, Box::new(Broken)).unwrap();
        let result = est.estimate("Hello, World! 42", true).unwrap();
        assert_eq!(result.method, EstimationMethod::Fallback);
        assert_eq!(result.tokens, 5);
        assert!(logs_contain("falling back to heuristic"));
    }

    #[test]
    fn precise_initialized_once_and_disposed_on_drop() {
        let inits = Arc::new(AtomicUsize::new(0));
        let disposed = Arc::new(AtomicBool::new(false));
        let est = Estimators::with_precise(
            4.0,
            Box::new(Counting {
                ready: false,
                inits: Arc::clone(&inits),
                disposed: Arc::clone(&disposed),
            }),
        )
        .unwrap();

        let first = est.estimate("one two three", true).unwrap();
        let second = est.estimate("four five", true).unwrap();
        assert_eq!(first.tokens, 3);
        assert_eq!(second.tokens, 2);
        assert_eq!(first.method, EstimationMethod::Exact);
        assert_eq!(inits.load(Ordering::SeqCst), 1);

        drop(est);
        assert!(disposed.load(Ordering::SeqCst));
    }

    #[test]
    fn tiktoken_is_the_default_precise_path() {
        let est = Estimators::new(DEFAULT_DIVISOR).unwrap();
        let result = est.estimate("Hello world", true).unwrap();
        assert_eq!(result.method, EstimationMethod::Exact);
        assert_eq!(result.tokens, 2);
    }

    #[test]
    fn invalid_divisor_is_rejected() {
        let err = Estimators::new(0.0).unwrap_err();
        assert_eq!(err.kind(), tok_core::ErrorKind::InvalidArgument);
    }

    #[test]
    fn empty_text_is_zero_on_every_path() {
        let est = Estimators::with_precise(4.0, Box::new(Broken)).unwrap();
        assert_eq!(est.estimate("", false).unwrap().tokens, 0);
        assert_eq!(est.estimate("", true).unwrap().tokens, 0);
    }
}
