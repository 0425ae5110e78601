// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thread-safe handle to a [`CostTracker`].

use std::sync::{Arc, Mutex, MutexGuard};

use indexmap::IndexMap;

use crate::pricing::ModelPrice;
use crate::tracker::{CostSummary, CostTracker, ModelTotals, TokenTotals, TrackerState};

/// Cloneable, lock-guarded tracker shared between concurrent callers.
///
/// Every operation takes the lock once, so readers never see a partially
/// applied `add` or a stale start time after `reset`.
#[derive(Debug, Clone, Default)]
pub struct SharedCostTracker {
    inner: Arc<Mutex<CostTracker>>,
}

impl SharedCostTracker {
    pub fn new(tracker: CostTracker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    // Each method mutates in a single critical section, so a poisoned lock
    // still guards a consistent ledger.
    fn lock(&self) -> MutexGuard<'_, CostTracker> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn add(&self, model: &str, prompt_tokens: u64, completion_tokens: u64, price: &ModelPrice) {
        self.lock().add(model, prompt_tokens, completion_tokens, price);
    }

    /// Apply `add`, then hand the resulting state to `persist` before the
    /// lock is released.
    ///
    /// Concurrent callers persist in the same order they mutate, so the last
    /// write always matches the ledger.
    pub fn add_then<R>(
        &self,
        model: &str,
        prompt_tokens: u64,
        completion_tokens: u64,
        price: &ModelPrice,
        persist: impl FnOnce(&TrackerState) -> R,
    ) -> R {
        let mut tracker = self.lock();
        tracker.add(model, prompt_tokens, completion_tokens, price);
        persist(&tracker.export_state())
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Reset, then hand the empty state to `persist` before the lock is released.
    pub fn reset_then<R>(&self, persist: impl FnOnce(&TrackerState) -> R) -> R {
        let mut tracker = self.lock();
        tracker.reset();
        persist(&tracker.export_state())
    }

    pub fn snapshot(&self) -> IndexMap<String, ModelTotals> {
        self.lock().snapshot()
    }

    pub fn summary(&self) -> CostSummary {
        self.lock().summary()
    }

    pub fn grand_total(&self) -> f64 {
        self.lock().grand_total()
    }

    pub fn total_tokens(&self) -> TokenTotals {
        self.lock().total_tokens()
    }

    pub fn export_state(&self) -> TrackerState {
        self.lock().export_state()
    }

    pub fn import_state(&self, state: TrackerState) {
        self.lock().import_state(state);
    }
}

impl From<CostTracker> for SharedCostTracker {
    fn from(tracker: CostTracker) -> Self {
        Self::new(tracker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const PRICE: ModelPrice = ModelPrice {
        prompt: 1.0,
        completion: 2.0,
    };

    #[test]
    fn concurrent_adds_lose_no_updates() {
        let shared = SharedCostTracker::default();
        let workers: Vec<_> = (0..8u64)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..250 {
                        shared.add("gpt-4o", i + 1, 1, &PRICE);
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }

        // 250 * (1 + 2 + ... + 8)
        let totals = shared.snapshot()["gpt-4o"];
        assert_eq!(totals.prompt_tokens, 250 * 36);
        assert_eq!(totals.completion_tokens, 8 * 250);
    }

    #[test]
    fn clones_share_one_ledger() {
        let a = SharedCostTracker::default();
        let b = a.clone();
        a.add("gpt-4o", 100, 0, &PRICE);
        assert_eq!(b.total_tokens().prompt, 100);

        b.reset();
        assert!(a.summary().models.is_empty());
    }

    #[test]
    fn persist_hooks_see_post_operation_state() {
        let shared = SharedCostTracker::default();
        let after_add = shared.add_then("gpt-4o", 10, 5, &PRICE, TrackerState::clone);
        assert_eq!(after_add.totals["gpt-4o"].prompt_tokens, 10);

        let after_reset = shared.reset_then(TrackerState::clone);
        assert!(after_reset.totals.is_empty());
        assert!(after_reset.start_time >= after_add.start_time);
    }

    #[test]
    fn persisted_states_arrive_in_mutation_order() {
        let shared = SharedCostTracker::default();
        let written = Arc::new(Mutex::new(Vec::new()));
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                let written = Arc::clone(&written);
                thread::spawn(move || {
                    for _ in 0..50 {
                        shared.add_then("gpt-4o", 1, 0, &PRICE, |state| {
                            written
                                .lock()
                                .unwrap()
                                .push(state.totals["gpt-4o"].prompt_tokens);
                        });
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }

        let written = written.lock().unwrap();
        let expected: Vec<u64> = (1..=400).collect();
        assert_eq!(*written, expected);
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let shared = SharedCostTracker::default();
        shared.add("gpt-4o", 1, 0, &PRICE);

        let poisoner = shared.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        shared.add("gpt-4o", 1, 0, &PRICE);
        assert_eq!(shared.total_tokens().prompt, 2);
        assert!(shared.grand_total() > 0.0);
    }
}
