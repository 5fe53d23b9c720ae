// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timed sequences built from chained entries.

use core::time::Duration;
use understory_timing::TimerQueue;

#[derive(Debug, PartialEq)]
enum Step {
    Start,
    Final,
    Done,
}

/// Each step schedules the next one from inside the handler, so a step only
/// runs after the previous wait has elapsed.
#[test]
fn chained_steps_run_one_wait_apart() {
    let step = Duration::from_millis(100);
    let mut timers = TimerQueue::new();
    let mut log = Vec::new();
    timers.schedule(Duration::ZERO, Step::Start);

    let until = Duration::from_millis(1_000);
    while let Some((id, s)) = timers.pop_due(until) {
        log.push((id.deadline().as_millis(), format!("{s:?}")));
        match s {
            Step::Start => {
                timers.schedule(step, Step::Final);
            }
            Step::Final => {
                timers.schedule(step, Step::Done);
            }
            Step::Done => {}
        }
    }

    assert_eq!(
        log,
        [
            (0, String::from("Start")),
            (100, String::from("Final")),
            (200, String::from("Done"))
        ]
    );
    assert_eq!(timers.now(), Duration::from_millis(200));
}

#[test]
fn independent_sequences_interleave() {
    let mut timers = TimerQueue::new();
    timers.schedule(Duration::from_millis(50), "mask");
    timers.schedule(Duration::from_millis(100), "dialog");
    timers.schedule(Duration::from_millis(50), "toast");

    let fired: Vec<_> =
        core::iter::from_fn(|| timers.pop_due(Duration::from_millis(100)).map(|(_, s)| s)).collect();
    assert_eq!(fired, ["mask", "toast", "dialog"]);
}
