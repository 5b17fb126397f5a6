//! Cooperative cancellation for long-running solves.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable cancellation token shared between a solve and its caller.
///
/// The search polls [`is_cancelled`](Self::is_cancelled) at every recursive
/// entry, so a caller holding a clone of the token may call
/// [`cancel`](Self::cancel) from any thread to abort the solve. The flag is
/// write-once per solve and only ever read inside the search, so a relaxed
/// atomic is all the synchronization required.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from any thread, and idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Error returned by a solve that observed a cancellation request.
///
/// Distinct from both "invalid puzzle" and "no solution": those are reported
/// through the solve report, while a cancelled solve produces no report at
/// all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solve was cancelled")
    }
}

impl std::error::Error for Cancelled {}
