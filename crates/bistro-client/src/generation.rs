//! # Request Generations
//!
//! Keeps a slow, stale response from overwriting a newer one.
//!
//! ## The Race
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  t0  user picks branch 1   ──► begin() = ticket #1 ──► GET /branch/1   │
//! │  t1  user picks branch 2   ──► begin() = ticket #2 ──► GET /branch/2   │
//! │  t2  branch 2 answers      ──► apply(#2, data)      ✔ stored           │
//! │  t3  branch 1 answers      ──► apply(#1, data)      ✘ dropped (stale)  │
//! │                                                                         │
//! │  Without tickets the page would show branch 1 data under branch 2.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One [`LatestOnly`] per page-state slot (a list, a detail view). Slots
//! are independent of each other.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

/// Monotonic counter handing out request tickets.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    current: Arc<AtomicU64>,
}

/// Identifies one request within a [`RequestGeneration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, invalidating every earlier ticket.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True if no request was started after `ticket`.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }

    /// Invalidates outstanding tickets without starting a request,
    /// e.g. when the page is left.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

/// A value slot that only accepts results from the newest request.
#[derive(Debug)]
pub struct LatestOnly<T> {
    generation: RequestGeneration,
    value: Mutex<Option<(RequestTicket, T)>>,
}

impl<T> Default for LatestOnly<T> {
    fn default() -> Self {
        LatestOnly {
            generation: RequestGeneration::new(),
            value: Mutex::new(None),
        }
    }
}

impl<T> LatestOnly<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request for this slot.
    pub fn begin(&self) -> RequestTicket {
        self.generation.begin()
    }

    /// Stores `value` if `ticket` is still the newest. Returns whether it
    /// was stored.
    pub fn apply(&self, ticket: RequestTicket, value: T) -> bool {
        let mut slot = self.lock();
        if !self.generation.is_current(ticket) {
            debug!(ticket = ticket.0, "Dropping stale response");
            return false;
        }
        *slot = Some((ticket, value));
        true
    }

    /// Drops the stored value and invalidates in-flight requests.
    pub fn clear(&self) {
        let mut slot = self.lock();
        self.generation.invalidate();
        *slot = None;
    }

    /// Runs `f` on the stored value.
    pub fn with<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        let slot = self.lock();
        f(slot.as_ref().map(|(_, value)| value))
    }

    /// Ticket of the request that produced the stored value.
    pub fn stored_ticket(&self) -> Option<RequestTicket> {
        self.lock().as_ref().map(|(ticket, _)| *ticket)
    }

    fn lock(&self) -> MutexGuard<'_, Option<(RequestTicket, T)>> {
        // A panic while holding the lock cannot leave the Option half
        // written, so a poisoned slot is still usable.
        self.value.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone> LatestOnly<T> {
    /// Clone of the stored value.
    pub fn get(&self) -> Option<T> {
        self.with(|value| value.cloned())
    }
}
