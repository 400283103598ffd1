//! Request correlation.
//!
//! Every backend request carries a [`RequestId`] from its `Requested`
//! action through to its completion, so a caller waiting on the store only
//! ever sees the completion of its own request.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one backend request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source of fresh [`RequestId`]s
#[derive(Debug)]
pub struct RequestIds {
    next: AtomicU64,
}

impl RequestIds {
    /// Start counting at 1
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// A fresh id, never handed out before by this source
    pub fn next(&self) -> RequestId {
        RequestId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for RequestIds {
    fn default() -> Self {
        Self::new()
    }
}
