// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! A [`TimerQueue`] keeps payloads ordered by deadline on a virtual clock.
//! It never reads a system clock and never sleeps: the host decides when time
//! passes and pops whatever has come due. This makes timed sequences such as
//! animation choreography deterministic and testable.
//!
//! Entries that share a deadline come out in the order they were scheduled.
//!
//! ```rust
//! use core::time::Duration;
//! use understory_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule(Duration::from_millis(100), "second");
//! timers.schedule(Duration::from_millis(50), "first");
//!
//! let until = timers.now() + Duration::from_millis(100);
//! let mut fired = Vec::new();
//! while let Some((_, what)) = timers.pop_due(until) {
//!     fired.push(what);
//! }
//! assert_eq!(fired, ["first", "second"]);
//! assert_eq!(timers.now(), Duration::from_millis(100));
//! ```

#![no_std]

extern crate alloc;

mod queue;

pub use queue::{TimerId, TimerQueue};
