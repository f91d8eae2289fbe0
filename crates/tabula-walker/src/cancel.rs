//! Cooperative cancellation for in-flight searches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A shared flag the search polls between node expansions.
///
/// Cancellation lives outside the search's node and result data: the UI
/// thread keeps one clone and trips it when the user moves the token
/// again, the worker polls its clone once per expansion. Never preemptive
/// — a trip is observed at the next expansion boundary.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, untripped token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the token. Every clone observes it.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether the token has been tripped.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
