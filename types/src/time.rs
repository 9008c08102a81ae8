//! Wall-clock timestamps for submission records.
//!
//! Stored as whole Unix seconds (UTC). Bookkeeping only needs ordering and
//! display; sub-second precision would just bloat the log.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => Self(elapsed.as_secs()),
            // Clock set before 1970; clamp instead of panicking in the
            // middle of a store append.
            Err(_) => Self(0),
        }
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Whole seconds between `self` and a later timestamp, saturating at 0.
    pub fn seconds_until(&self, later: Timestamp) -> u64 {
        later.0.saturating_sub(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
