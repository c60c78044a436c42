//! Short-lived highlight after a throw.
//!
//! Nothing here runs on its own. The caller passes the current time in and
//! polls [`Highlights::expire`] from its event loop.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a participant stays highlighted after a throw.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(300);

/// Pending highlight deadlines keyed by participant name.
#[derive(Debug, Clone, Default)]
pub struct Highlights {
    deadlines: HashMap<String, Instant>,
}

impl Highlights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a highlight that ends `HIGHLIGHT_DURATION` after `now`.
    pub fn start(&mut self, name: &str, now: Instant) {
        self.deadlines
            .insert(name.to_string(), now + HIGHLIGHT_DURATION);
    }

    pub fn is_pending(&self, name: &str) -> bool {
        self.deadlines.contains_key(name)
    }

    /// Drop a pending highlight without reporting it.
    pub fn forget(&mut self, name: &str) {
        self.deadlines.remove(name);
    }

    /// Remove and return every name whose deadline has passed.
    pub fn expire(&mut self, now: Instant) -> Vec<String> {
        let mut expired: Vec<String> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(name, _)| name.clone())
            .collect();
        for name in &expired {
            self.deadlines.remove(name);
        }
        expired.sort();
        expired
    }
}
