// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: pointer interaction state for movable, resizable boxes.
//!
//! - [`drag`]: press-move-release sessions that move a box or resize it from
//!   one of eight handles, plus hit-testing of those handles.
//!
//! The state machine does not own the box it manipulates. Callers capture the
//! box rectangle on press, feed pointer positions on move, and write back the
//! rectangle it returns. This keeps it independent of any particular tree,
//! style system or event router.
//!
//! ```rust
//! # #[cfg(feature = "drag")]
//! # fn example() {
//! use kurbo::{Point, Rect};
//! use understory_event_state::drag::{DragResizeState, Grip, hit_grip};
//!
//! let dialog = Rect::new(0.0, 0.0, 400.0, 300.0);
//! let press = Point::new(200.0, 150.0);
//! let grip = hit_grip(dialog, press, 10.0).unwrap();
//! assert_eq!(grip, Grip::Move);
//!
//! let mut session = DragResizeState::new();
//! session.begin(grip, press, dialog);
//! let moved = session.update(Point::new(210.0, 140.0)).unwrap();
//! assert_eq!((moved.x0, moved.y0), (10.0, -10.0));
//! # }
//! ```
//!
//! ## Features
//!
//! - `drag`: Enable drag/resize sessions (requires `kurbo` dependency)
//!
//! This crate is `no_std` compatible.

#![no_std]

#[cfg(feature = "drag")]
pub mod drag;
