//! Debounced bake scheduling.
//!
//! Every change notification cancels the pending bake and schedules a new one
//! `delay` later, so a burst of notifications produces a single bake once the
//! surface has been quiet for the whole window. Time is passed in by the
//! caller; the scheduler never reads the clock itself.
//!
//! A delay too long to represent as an [`Instant`] leaves the bake pending
//! with no deadline. It only runs when triggered explicitly.

use std::time::{Duration, Instant};

use tracing::{trace, warn};

/// Identifies one scheduled bake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BakeTicket(u64);

impl BakeTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingBake {
    ticket: BakeTicket,
    due: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct BakeScheduler {
    delay: Duration,
    pending: Option<PendingBake>,
    next_ticket: u64,
}

impl BakeScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            next_ticket: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending bake and schedule a new one `delay` after `now`.
    pub fn schedule(&mut self, now: Instant) -> BakeTicket {
        if let Some(superseded) = self.pending.take() {
            trace!(ticket = superseded.ticket.0, "Pending bake superseded");
        }

        let ticket = BakeTicket(self.next_ticket);
        self.next_ticket += 1;
        let due = now.checked_add(self.delay);
        if due.is_none() {
            warn!(
                ticket = ticket.0,
                delay = ?self.delay,
                "Bake deadline out of range, bake will not fire"
            );
        }
        self.pending = Some(PendingBake { ticket, due });
        ticket
    }

    /// Drop the pending bake, if any.
    pub fn cancel(&mut self) -> Option<BakeTicket> {
        self.pending.take().map(|p| p.ticket)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending bake. `None` if nothing is pending or the
    /// deadline is out of range.
    pub fn due_at(&self) -> Option<Instant> {
        self.pending.and_then(|p| p.due)
    }

    /// Take the pending bake if its window has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<BakeTicket> {
        match self.pending {
            Some(PendingBake {
                ticket,
                due: Some(due),
            }) if now >= due => {
                self.pending = None;
                Some(ticket)
            }
            _ => None,
        }
    }
}
