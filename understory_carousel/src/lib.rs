// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_carousel --heading-base-level=0

//! Understory Carousel: a headless carousel (slider) engine.
//!
//! A carousel shows one slide at a time through a fixed-width viewport and
//! slides a horizontal strip to reveal the next, previous, or any chosen slide,
//! optionally wrapping around and advancing on a timer.
//!
//! This crate owns the _state machine_ of such a widget and nothing else:
//!
//! - [`SlideStrip`]: slide handles in render order, the strip offset, and the
//!   active marker. Moving slides means reordering this sequence.
//! - [`Carousel`]: the engine. It runs transitions for [`Carousel::next`],
//!   [`Carousel::prev`] and [`Carousel::move_at`], guards against overlapping
//!   transitions, and drives autoplay with [`Carousel::play`] / [`Carousel::pause`].
//! - [`Trigger`], [`DragRecognizer`] and [`CarouselInput`]: adapters that turn
//!   clicks and horizontal drags into engine operations.
//! - [`Markup`]: the element tree a DOM host builds around the slides, kept in
//!   sync with the engine's state.
//!
//! The engine never reads a clock or touches a document. Hosts report time
//! with [`Carousel::advance_to`], which runs every deferred step that came due
//! (animation settle, clone removal, autoplay ticks), and render whatever the
//! strip currently holds.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_carousel::{Carousel, CarouselOptions, RootMetrics};
//!
//! let mut carousel = Carousel::builder()
//!     .root(RootMetrics::new(Size::new(300.0, 200.0), 3))
//!     .options(
//!         CarouselOptions::default()
//!             .with_duration_ms(300)
//!             .with_autoplay(false),
//!     )
//!     .build()
//!     .unwrap();
//!
//! carousel.next();
//! assert!(carousel.is_moving());
//!
//! // A second request while the first is in flight is absorbed.
//! carousel.next();
//!
//! carousel.advance_to(300);
//! assert!(!carousel.is_moving());
//! assert_eq!(carousel.active_index(), 1);
//! assert_eq!(carousel.dots().and_then(|d| d.active()), Some(1));
//! ```
//!
//! ## Looping strategies
//!
//! [`LoopStrategy::ReflowAfterSlide`] (the default) slides the strip by whole
//! steps and, once the animation settles, moves the passed slides to the end
//! and resets the offset. Backward moves first bring the trailing slides to the
//! front behind a transient clone of the current slide, so the viewport does not
//! jump, then slide onto them. The strip therefore wraps seamlessly.
//!
//! [`LoopStrategy::Bounded`] never reorders: the offset simply tracks the
//! active index and moves past either end are ignored.
//!
//! ## Timing
//!
//! Transitions settle `duration_ms` after they start. Some rendering engines
//! drop a transition re-enabled in the same frame as a DOM mutation; set
//! [`CarouselOptions::reenable_delay_ms`] for those.
//!
//! Autoplay installs its interval from a zero-delay deferral, so the first
//! automatic advance happens `autoplay_delay_ms` after the next
//! [`Carousel::advance_to`]. [`Carousel::pause`] cancels it and leaves the
//! carousel idle.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` builds.
//! - `serde`: `Serialize`/`Deserialize` for [`CarouselOptions`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod drag;
mod engine;
mod error;
mod input;
pub mod markup;
mod options;
mod strip;
mod trigger;

pub use drag::DragRecognizer;
pub use engine::{Carousel, CarouselBuilder, RootMetrics};
pub use error::{ConfigurationError, InvalidIndexError};
pub use input::CarouselInput;
pub use markup::{Markup, RootElement, SlideElement};
pub use options::{CarouselOptions, DotOptions, LoopStrategy, NavOptions};
pub use strip::{DotStrip, Slide, SlideId, SlideStrip};
pub use trigger::Trigger;
