// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options.
//!
//! Every option has a default, so hosts only spell out what they change:
//!
//! ```rust
//! use understory_carousel::{CarouselOptions, LoopStrategy};
//!
//! let options = CarouselOptions::default()
//!     .with_duration_ms(300)
//!     .with_autoplay(false)
//!     .with_loop_strategy(LoopStrategy::Bounded);
//!
//! assert_eq!(options.duration_ms, 300);
//! assert!(!options.loops());
//! ```

use alloc::string::String;

/// How the strip reaches slides beyond the current one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoopStrategy {
    /// Slide by whole steps and reorder the strip once the animation settles,
    /// masking backward moves with a transient clone. Supports wraparound.
    #[default]
    ReflowAfterSlide,
    /// Keep the strip in its original order and clamp the offset to
    /// `[-(count - 1) * width, 0]`. Never wraps.
    Bounded,
}

/// Button navigation options.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavOptions {
    /// Render the navigation block at all. Dots live inside it.
    pub display: bool,
    /// Extra class for the navigation block.
    pub class: String,
    /// Render the previous/next button pair.
    pub buttons: bool,
    /// Extra class for the button container.
    pub buttons_class: String,
    /// Extra class for the "next" button.
    pub next_class: String,
    /// Extra class for the "previous" button.
    pub prev_class: String,
    /// Label of the "next" button.
    pub text_next: String,
    /// Label of the "previous" button.
    pub text_prev: String,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            display: true,
            class: String::new(),
            buttons: true,
            buttons_class: String::new(),
            next_class: String::new(),
            prev_class: String::new(),
            text_next: "nextItem".into(),
            text_prev: "prevItem".into(),
        }
    }
}

/// Dot indicator options.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DotOptions {
    /// Render one dot per slide.
    pub display: bool,
    /// Extra class for the dot container.
    pub class: String,
    /// Extra class for every dot.
    pub dot_class: String,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            display: true,
            class: String::new(),
            dot_class: String::new(),
        }
    }
}

/// Options recognized when building a [`Carousel`](crate::Carousel).
///
/// With the `serde` feature, missing fields fall back to their defaults, so a
/// partial document such as `{"duration_ms": 300, "autoplay": false}` is valid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselOptions {
    /// Extra class on the generated outer wrapper.
    pub outer_class: String,
    /// Recognize horizontal pointer drags as next/previous.
    pub draggable: bool,
    /// Wrap around at the first and last slide.
    pub loop_enabled: bool,
    /// Transition length in milliseconds.
    pub duration_ms: u64,
    /// Extra class applied to every slide.
    pub item_class: String,
    /// Start autoplay at construction.
    pub autoplay: bool,
    /// Interval between automatic advances in milliseconds. Must be non-zero.
    pub autoplay_delay_ms: u64,
    /// Button navigation.
    pub nav: NavOptions,
    /// Dot indicators.
    pub dots: DotOptions,
    /// Strip movement strategy.
    pub loop_strategy: LoopStrategy,
    /// Delay between a strip mutation and re-enabling the transition.
    ///
    /// Some rendering engines drop a transition that is re-enabled in the same
    /// frame as a DOM mutation; those need roughly 100ms here. Zero elsewhere.
    pub reenable_delay_ms: u64,
    /// Horizontal pointer travel, in pixels, that turns a drag into a move.
    pub drag_threshold: f64,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            outer_class: String::new(),
            draggable: false,
            loop_enabled: true,
            duration_ms: 750,
            item_class: String::new(),
            autoplay: true,
            autoplay_delay_ms: 2_000,
            nav: NavOptions::default(),
            dots: DotOptions::default(),
            loop_strategy: LoopStrategy::ReflowAfterSlide,
            reenable_delay_ms: 0,
            drag_threshold: 35.0,
        }
    }
}

impl CarouselOptions {
    /// Returns `true` if moves wrap around at the boundaries.
    ///
    /// [`LoopStrategy::Bounded`] never wraps, whatever `loop_enabled` says.
    #[must_use]
    pub fn loops(&self) -> bool {
        self.loop_enabled && self.loop_strategy == LoopStrategy::ReflowAfterSlide
    }

    /// Returns `true` if dot indicators are rendered and tracked.
    #[must_use]
    pub fn shows_dots(&self) -> bool {
        self.nav.display && self.dots.display
    }

    /// Returns `true` if the previous/next buttons are rendered.
    #[must_use]
    pub fn shows_buttons(&self) -> bool {
        self.nav.display && self.nav.buttons
    }

    /// Sets the outer wrapper class.
    #[must_use]
    pub fn with_outer_class(mut self, class: impl Into<String>) -> Self {
        self.outer_class = class.into();
        self
    }

    /// Enables or disables drag recognition.
    #[must_use]
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Enables or disables wraparound.
    #[must_use]
    pub fn with_loop(mut self, loop_enabled: bool) -> Self {
        self.loop_enabled = loop_enabled;
        self
    }

    /// Sets the transition length.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Sets the class applied to every slide.
    #[must_use]
    pub fn with_item_class(mut self, class: impl Into<String>) -> Self {
        self.item_class = class.into();
        self
    }

    /// Enables or disables autoplay at construction.
    #[must_use]
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Sets the autoplay interval.
    #[must_use]
    pub fn with_autoplay_delay_ms(mut self, delay_ms: u64) -> Self {
        self.autoplay_delay_ms = delay_ms;
        self
    }

    /// Replaces the navigation options.
    #[must_use]
    pub fn with_nav(mut self, nav: NavOptions) -> Self {
        self.nav = nav;
        self
    }

    /// Replaces the dot options.
    #[must_use]
    pub fn with_dots(mut self, dots: DotOptions) -> Self {
        self.dots = dots;
        self
    }

    /// Selects the strip movement strategy.
    #[must_use]
    pub fn with_loop_strategy(mut self, strategy: LoopStrategy) -> Self {
        self.loop_strategy = strategy;
        self
    }

    /// Sets the post-mutation transition re-enable delay.
    #[must_use]
    pub fn with_reenable_delay_ms(mut self, delay_ms: u64) -> Self {
        self.reenable_delay_ms = delay_ms;
        self
    }

    /// Sets the drag distance threshold.
    #[must_use]
    pub fn with_drag_threshold(mut self, threshold: f64) -> Self {
        self.drag_threshold = threshold;
        self
    }
}
