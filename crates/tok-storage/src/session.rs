// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session record: the persisted [`TrackerState`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tok_core::TokError;
use tok_cost::{Clock, CostTracker, SystemClock, TrackerState};
use tracing::info;

use crate::file::{read_json, write_json_atomic};

/// File name of the session record inside the data directory.
pub const SESSION_FILE: &str = "session.json";

/// Reads and writes `<data_dir>/session.json`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved state, or `None` if there is none or it is unusable.
    pub fn load(&self) -> Option<TrackerState> {
        read_json(&self.path)
    }

    pub fn save(&self, state: &TrackerState) -> Result<(), TokError> {
        write_json_atomic(&self.path, state)
    }

    /// Resume the saved session, or start a fresh one timed by the system clock.
    pub fn load_tracker(&self) -> CostTracker {
        self.load_tracker_with_clock(Arc::new(SystemClock))
    }

    pub fn load_tracker_with_clock(&self, clock: Arc<dyn Clock>) -> CostTracker {
        match self.load() {
            Some(state) => {
                info!(
                    models = state.totals.len(),
                    start_time = %state.start_time,
                    "resuming tracking session"
                );
                CostTracker::from_state(state, clock)
            }
            None => CostTracker::with_clock(clock),
        }
    }
}
