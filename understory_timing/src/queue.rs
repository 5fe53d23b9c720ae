// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline-ordered timer queue.

use alloc::collections::BTreeMap;
use core::fmt;
use core::time::Duration;

/// Handle to a scheduled entry.
///
/// Ordering follows deadline first, then scheduling order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId {
    deadline: Duration,
    seq: u64,
}

impl TimerId {
    /// The instant at which the entry comes due.
    #[must_use]
    pub const fn deadline(self) -> Duration {
        self.deadline
    }
}

impl fmt::Debug for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerId(#{} @ {:?})", self.seq, self.deadline)
    }
}

/// A virtual-time queue of payloads keyed by deadline.
///
/// Time starts at zero and only moves forward, through [`TimerQueue::pop_due`]
/// and [`TimerQueue::advance_to`].
#[derive(Clone)]
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    entries: BTreeMap<TimerId, T>,
}

impl<T> fmt::Debug for TimerQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.now)
            .field("pending", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            entries: BTreeMap::new(),
        }
    }

    /// The current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `payload` to come due `delay` after [`TimerQueue::now`].
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        self.schedule_at(self.now.saturating_add(delay), payload)
    }

    /// Schedules `payload` at an absolute deadline.
    ///
    /// Deadlines in the past come due on the next pop.
    pub fn schedule_at(&mut self, deadline: Duration, payload: T) -> TimerId {
        let id = TimerId {
            deadline,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.entries.insert(id, payload);
        id
    }

    /// Cancels an entry, returning its payload if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.entries.remove(&id)
    }

    /// Returns `true` if the entry is still pending.
    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// The earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|id| id.deadline)
    }

    /// Pops the earliest entry due at or before `until`.
    ///
    /// The clock advances to the popped entry's deadline (never backwards), so
    /// anything scheduled while handling it is relative to that instant.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        let first = *self.entries.keys().next()?;
        if first.deadline > until {
            return None;
        }
        let payload = self.entries.remove(&first)?;
        self.now = self.now.max(first.deadline);
        Some((first, payload))
    }

    /// Moves the clock forward to `t`. Earlier values are ignored.
    pub fn advance_to(&mut self, t: Duration) {
        self.now = self.now.max(t);
    }

    /// Number of pending entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every pending entry. The clock is unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
