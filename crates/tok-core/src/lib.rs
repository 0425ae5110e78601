// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for tok.
//!
//! This crate provides the error type, the shared estimation types and the
//! [`TokenEstimator`] trait used throughout the tok workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ErrorKind, TokError};
pub use traits::TokenEstimator;
pub use types::{DEFAULT_MODEL, Estimation, EstimationMethod, OutputFormat};

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(usize);

    impl TokenEstimator for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn estimate(&self, _text: &str) -> Result<usize, TokError> {
            Ok(self.0)
        }
    }

    #[test]
    fn default_lifecycle_hooks_are_noops() {
        let mut est = Fixed(7);
        assert!(est.is_ready());
        est.initialize().unwrap();
        est.dispose();
        assert!(est.is_ready());
        assert_eq!(est.estimate("anything").unwrap(), 7);
    }

    #[test]
    fn estimator_is_object_safe() {
        let boxed: Box<dyn TokenEstimator> = Box::new(Fixed(1));
        assert_eq!(boxed.name(), "fixed");
    }
}
