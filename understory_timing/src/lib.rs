// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! UI components frequently need "run this later" behavior: finish an animation
//! after its duration elapses, re-enable a transition after a layout flush, or
//! advance a slideshow on a fixed interval. Browser code reaches for
//! `setTimeout`/`setInterval`; native toolkits each have their own timer APIs.
//!
//! This crate provides a small, deterministic [`TimerQueue`] that models both
//! kinds of deferral without owning a clock or a thread:
//!
//! - Timestamps are plain `u64` milliseconds on a monotonic clock chosen by the host.
//! - One-shot timers fire once at their deadline.
//! - Repeating timers keep their [`TimerId`] and are rescheduled at
//!   `deadline + interval` every time they fire.
//! - Timers with equal deadlines fire in the order they were scheduled.
//!
//! The host decides when time advances. A typical integration drains due timers
//! from its event loop and sleeps until [`TimerQueue::next_deadline`]:
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Job {
//!     Settle,
//!     Tick,
//! }
//!
//! let mut timers = TimerQueue::new();
//! let settle = timers.schedule_at(300, Job::Settle);
//! let tick = timers.schedule_repeating(1_000, 1_000, Job::Tick);
//!
//! assert_eq!(timers.next_deadline(), Some(300));
//!
//! // Nothing is due yet.
//! assert!(timers.pop_due(299).is_none());
//!
//! // At 300ms the one-shot fires and is gone.
//! let fired = timers.pop_due(300).unwrap();
//! assert_eq!((fired.id, fired.payload), (settle, Job::Settle));
//! assert!(!timers.contains(settle));
//!
//! // The repeating timer fires at 1000ms and stays scheduled for 2000ms.
//! let fired = timers.pop_due(1_000).unwrap();
//! assert_eq!(fired.id, tick);
//! assert_eq!(timers.deadline_of(tick), Some(2_000));
//!
//! // Cancelling hands the payload back.
//! assert_eq!(timers.cancel(tick), Some(Job::Tick));
//! assert!(timers.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod queue;

pub use queue::{Fired, TimerId, TimerQueue};
