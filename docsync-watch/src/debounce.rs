//! Per-path debouncing of filesystem change events.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::Instant;

/// Entries older than this are pruned so the map cannot grow unbounded.
const RETENTION: Duration = Duration::from_secs(30);

/// Suppresses repeated events for the same path inside a fixed window, so a
/// burst of editor saves collapses to one trigger.
pub(crate) struct Debounce {
    window: Duration,
    seen: HashMap<PathBuf, Instant>,
}

impl Debounce {
    pub(crate) fn new(window: Duration) -> Self {
        Debounce {
            window,
            seen: HashMap::new(),
        }
    }

    /// Should an event for `path` at `now` be acted on?
    pub(crate) fn should_process(&mut self, path: &Path, now: Instant) -> bool {
        self.seen
            .retain(|_, seen_at| now.duration_since(*seen_at) <= RETENTION);
        match self.seen.get(path) {
            Some(last_seen) if now.duration_since(*last_seen) < self.window => false,
            _ => {
                self.seen.insert(path.to_path_buf(), now);
                true
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
