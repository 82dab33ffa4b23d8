//! Request sequencing
//!
//! A panel that can have several requests in flight issues a [`Ticket`]
//! per request. Only the most recently issued ticket is current; a
//! response whose ticket went stale is discarded instead of applied, so
//! the panel always shows the answer to the latest request no matter the
//! order responses arrive in.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic ticket issuer for one panel
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: AtomicU64,
}

/// Proof of a request's position in its panel's sequence
#[derive(Debug)]
pub struct Ticket<'a> {
    sequencer: &'a Sequencer,
    id: u64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket that supersedes every earlier one
    pub fn issue(&self) -> Ticket<'_> {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            sequencer: self,
            id,
        }
    }

    /// Make every outstanding ticket stale without issuing a new one
    pub fn cancel_all(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// Id of the most recently issued ticket (0 before the first)
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

impl Ticket<'_> {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// True while no newer ticket has been issued or cancellation requested
    pub fn is_current(&self) -> bool {
        self.sequencer.latest() == self.id
    }
}
