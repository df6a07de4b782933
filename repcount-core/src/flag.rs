//! Interrupt-to-loop event flag.

use portable_atomic::{AtomicBool, Ordering};

/// Single-producer/single-consumer event flag.
///
/// The interrupt side only calls [`raise`](Self::raise); the node loop only
/// calls [`take`](Self::take). No other state is shared between them.
#[derive(Debug, Default)]
pub struct EventFlag {
    raised: AtomicBool,
}

impl EventFlag {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Mark the event as pending. Safe to call from interrupt context.
    #[inline]
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Clear the flag, returning whether it was set.
    #[inline]
    #[must_use]
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }

    #[inline]
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}
