// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel engine: transitions, guard flags, and autoplay.

use alloc::vec::Vec;

use kurbo::Size;
use log::{debug, trace};
use understory_timing::{TimerId, TimerQueue};

use crate::error::{ConfigurationError, InvalidIndexError};
use crate::options::{CarouselOptions, LoopStrategy};
use crate::strip::{DotStrip, SlideStrip};
use crate::trigger::Trigger;

/// What the engine needs to know about the root container.
///
/// Hosts measure the root once, before handing it over, and count its children.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RootMetrics {
    /// Rendered size of the root; every slide gets this size.
    pub size: Size,
    /// Number of children that become slides.
    pub slide_count: usize,
}

impl RootMetrics {
    /// Creates root metrics.
    #[must_use]
    pub const fn new(size: Size, slide_count: usize) -> Self {
        Self { size, slide_count }
    }
}

/// Collects the root and options for a [`Carousel`].
#[derive(Clone, Debug, Default)]
pub struct CarouselBuilder {
    root: Option<RootMetrics>,
    options: CarouselOptions,
    start_time: u64,
}

impl CarouselBuilder {
    /// Creates a builder with default options and no root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root container metrics.
    #[must_use]
    pub fn root(mut self, root: RootMetrics) -> Self {
        self.root = Some(root);
        self
    }

    /// Sets the construction options.
    #[must_use]
    pub fn options(mut self, options: CarouselOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the clock reading, in milliseconds, at construction.
    #[must_use]
    pub fn start_time(mut self, now: u64) -> Self {
        self.start_time = now;
        self
    }

    /// Builds the carousel, marking slide 0 (and dot 0) active and starting
    /// autoplay if requested.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the root is missing, has no
    /// children, has an unusable size, or the autoplay delay is zero.
    pub fn build(self) -> Result<Carousel, ConfigurationError> {
        let root = self.root.ok_or(ConfigurationError::MissingRoot)?;
        if root.slide_count == 0 {
            return Err(ConfigurationError::NoSlides);
        }
        let Size { width, height } = root.size;
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height >= 0.0) {
            return Err(ConfigurationError::InvalidSize { width, height });
        }
        // `play` may start autoplay later, so the delay is checked either way.
        if self.options.autoplay_delay_ms == 0 {
            return Err(ConfigurationError::ZeroAutoplayDelay);
        }

        let mut strip = SlideStrip::new(root.slide_count, width);
        strip.mark_active_at(0);
        let dots = self.options.shows_dots().then(|| {
            let mut dots = DotStrip::new(root.slide_count);
            dots.point(0);
            dots
        });

        let autoplay = self.options.autoplay;
        let mut carousel = Carousel {
            options: self.options,
            size: root.size,
            strip,
            dots,
            active_index: 0,
            is_moving: false,
            is_jumping: false,
            is_paused: true,
            autoplay: None,
            timers: TimerQueue::new(),
            in_flight: Vec::new(),
            now: self.start_time,
        };
        debug!(
            "carousel built: {} slides, {}x{}",
            root.slide_count, width, height
        );
        if autoplay {
            carousel.play();
        }
        Ok(carousel)
    }
}

/// Which guard flag a transition holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Origin {
    /// `next`/`prev`: holds `is_moving`.
    Step,
    /// `move_at`: holds `is_jumping`.
    Jump,
}

/// Work deferred to a later clock reading.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Deferred {
    /// Forward slide finished: move the passed slides to the end and reset the offset.
    SettleForward { steps: usize, origin: Origin },
    /// Backward slide mask is in place: drop clones and re-enable the transition.
    ReleaseClones,
    /// Animate the strip back to offset zero.
    SlideIn,
    /// Backward slide finished.
    SettleBackward { origin: Origin },
    /// Bounded slide finished.
    SettleBounded { origin: Origin },
    /// Zero-delay autoplay deferral: install the interval.
    AutoplayInstall,
    /// Autoplay interval tick.
    AutoplayTick,
}

/// A headless carousel.
///
/// The engine owns a [`SlideStrip`] and the dot markers, and moves them in
/// response to [`next`](Self::next), [`prev`](Self::prev),
/// [`move_at`](Self::move_at), [`play`](Self::play) and [`pause`](Self::pause).
/// It never reads a clock: the host reports time through
/// [`advance_to`](Self::advance_to), which runs every deferral that came due.
///
/// A transition started while another one is in flight is silently ignored.
/// Completion is observable through the active markers once the transition's
/// duration has elapsed.
#[derive(Debug)]
pub struct Carousel {
    options: CarouselOptions,
    size: Size,
    strip: SlideStrip,
    dots: Option<DotStrip>,
    active_index: usize,
    is_moving: bool,
    is_jumping: bool,
    is_paused: bool,
    autoplay: Option<TimerId>,
    timers: TimerQueue<Deferred>,
    /// Pending deferrals of the transition in flight.
    in_flight: Vec<TimerId>,
    now: u64,
}

impl Carousel {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> CarouselBuilder {
        CarouselBuilder::new()
    }

    /// Returns the options the carousel was built with.
    #[must_use]
    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    /// Returns the measured root size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the number of slides.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.strip.len()
    }

    /// Returns the logical index of the active slide.
    ///
    /// This switches to the target as soon as a transition starts.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Returns the slide strip.
    #[must_use]
    pub fn strip(&self) -> &SlideStrip {
        &self.strip
    }

    /// Returns the dot markers, if dots are displayed.
    #[must_use]
    pub fn dots(&self) -> Option<&DotStrip> {
        self.dots.as_ref()
    }

    /// Returns the uniform slide width.
    #[must_use]
    pub fn item_width(&self) -> f64 {
        self.strip.item_width()
    }

    /// Returns the strip offset in pixels.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.strip.offset()
    }

    /// Returns `true` while a `next`/`prev` transition is in flight.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    /// Returns `true` while a `move_at` transition is in flight.
    #[must_use]
    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    /// Returns `true` unless autoplay is running.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Returns `true` if an autoplay deferral or interval is scheduled.
    #[must_use]
    pub fn is_autoplay_running(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Returns the engine's clock reading in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Returns when the host next needs to call [`advance_to`](Self::advance_to).
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Advances the clock to `now`, running every deferral due by then.
    ///
    /// Deferrals run in deadline order. While one runs, the clock reads its
    /// deadline, so zero-delay follow-ups run within the same call. A
    /// timestamp earlier than the current reading is ignored.
    pub fn advance_to(&mut self, now: u64) {
        if now < self.now {
            trace!("advance_to({now}) ignored: clock already at {}", self.now);
            return;
        }
        while let Some(fired) = self.timers.pop_due(now) {
            self.now = self.now.max(fired.deadline);
            self.run(fired.payload);
        }
        self.now = now;
    }

    /// Advances the clock by `delta` milliseconds.
    pub fn advance_by(&mut self, delta: u64) {
        self.advance_to(self.now.saturating_add(delta));
    }

    /// Runs the public operation a trigger names.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIndexError`] for a [`Trigger::MoveTo`] outside the slide range.
    pub fn dispatch(&mut self, trigger: Trigger) -> Result<(), InvalidIndexError> {
        match trigger {
            Trigger::Next => self.next(),
            Trigger::Prev => self.prev(),
            Trigger::MoveTo(index) => return self.move_at(index),
        }
        Ok(())
    }

    /// Shows the next slide, wrapping to the first if looping.
    pub fn next(&mut self) {
        if !self.can_start("next") {
            return;
        }
        let wraps = self.active_index + 1 == self.slide_count();
        if wraps && !self.options.loops() {
            trace!("next ignored: at last slide");
            return;
        }
        self.active_index = if wraps { 0 } else { self.active_index + 1 };
        self.is_moving = true;
        debug!("next -> {}", self.active_index);

        match self.options.loop_strategy {
            LoopStrategy::ReflowAfterSlide => self.begin_forward(1, Origin::Step),
            LoopStrategy::Bounded => self.begin_bounded(Origin::Step),
        }
        self.point_dot_active(self.active_index);
    }

    /// Shows the previous slide, wrapping to the last if looping.
    pub fn prev(&mut self) {
        if !self.can_start("prev") {
            return;
        }
        let wraps = self.active_index == 0;
        if wraps && !self.options.loops() {
            trace!("prev ignored: at first slide");
            return;
        }
        self.active_index = if wraps {
            self.slide_count() - 1
        } else {
            self.active_index - 1
        };
        self.is_moving = true;
        debug!("prev -> {}", self.active_index);

        match self.options.loop_strategy {
            LoopStrategy::ReflowAfterSlide => self.begin_backward(1, Origin::Step),
            LoopStrategy::Bounded => self.begin_bounded(Origin::Step),
        }
        self.point_dot_active(self.active_index);
    }

    /// Slides directly to `index`, moving forward if it is after the active
    /// slide and backward otherwise.
    ///
    /// Moving to the active slide, or while another transition is in flight,
    /// does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIndexError`] if `index` is not below [`slide_count`](Self::slide_count).
    pub fn move_at(&mut self, index: usize) -> Result<(), InvalidIndexError> {
        let slide_count = self.slide_count();
        if index >= slide_count {
            return Err(InvalidIndexError { index, slide_count });
        }
        if self.is_moving || self.is_jumping {
            trace!("move_at({index}) ignored: transition in flight");
            return Ok(());
        }
        let current = self.active_index;
        if index == current {
            trace!("move_at({index}) ignored: already active");
            return Ok(());
        }
        self.active_index = index;
        self.is_jumping = true;
        debug!("move_at {current} -> {index}");

        match self.options.loop_strategy {
            LoopStrategy::ReflowAfterSlide if index > current => {
                self.begin_forward(index - current, Origin::Jump);
            }
            LoopStrategy::ReflowAfterSlide => {
                self.begin_backward(current - index, Origin::Jump);
            }
            LoopStrategy::Bounded => self.begin_bounded(Origin::Jump),
        }
        self.point_dot_active(index);
        Ok(())
    }

    /// Starts autoplay.
    ///
    /// The interval is installed from a zero-delay deferral, so the first
    /// automatic advance happens one `autoplay_delay_ms` after the next
    /// [`advance_to`](Self::advance_to). Does nothing if autoplay is already scheduled.
    pub fn play(&mut self) {
        if self.autoplay.is_some() {
            trace!("play ignored: autoplay already scheduled");
            return;
        }
        self.is_paused = false;
        self.autoplay = Some(self.timers.schedule_after(self.now, 0, Deferred::AutoplayInstall));
        debug!("autoplay started");
    }

    /// Stops autoplay and leaves the carousel idle.
    ///
    /// A transition in flight is finished on the spot: its strip lands in the
    /// settled order without animation, clones are dropped and the active
    /// markers are re-pointed. Does nothing if already paused.
    pub fn pause(&mut self) {
        if self.is_paused {
            trace!("pause ignored: already paused");
            return;
        }
        if let Some(id) = self.autoplay.take() {
            self.timers.cancel(id);
        }
        self.finish_in_flight();
        self.is_paused = true;
        self.is_moving = false;
        self.is_jumping = false;
        debug!("autoplay paused");
    }

    fn can_start(&self, op: &str) -> bool {
        if self.is_moving || self.is_jumping {
            trace!("{op} ignored: transition in flight");
            return false;
        }
        if self.slide_count() < 2 {
            trace!("{op} ignored: nothing to move to");
            return false;
        }
        true
    }

    /// Schedules a deferral belonging to the transition in flight.
    fn schedule(&mut self, delay: u64, deferred: Deferred) {
        let id = self.timers.schedule_after(self.now, delay, deferred);
        self.in_flight.push(id);
    }

    /// Cancels the pending deferrals of the transition in flight and applies
    /// its settled state now.
    fn finish_in_flight(&mut self) {
        let pending: Vec<Deferred> = self
            .in_flight
            .drain(..)
            .filter_map(|id| self.timers.cancel(id))
            .collect();
        if pending.is_empty() {
            return;
        }
        trace!("finishing in-flight transition: {pending:?}");
        for deferred in pending {
            if matches!(
                deferred,
                Deferred::SettleForward { .. }
                    | Deferred::SettleBackward { .. }
                    | Deferred::SettleBounded { .. }
            ) {
                self.run(deferred);
            }
        }
        self.strip.set_animated(false);
    }

    /// Slide left by `steps`; the passed slides move to the end once settled.
    fn begin_forward(&mut self, steps: usize, origin: Origin) {
        self.strip.set_animated(true);
        self.strip.set_offset_steps(-to_steps(steps));
        self.schedule(
            self.options.duration_ms,
            Deferred::SettleForward { steps, origin },
        );
    }

    /// Bring the last `steps` slides to the front behind a clone of the
    /// current slide, then slide right onto them.
    fn begin_backward(&mut self, steps: usize, origin: Origin) {
        self.strip.set_animated(false);
        self.strip.rotate_to_start(steps);
        self.strip.insert_clone_at(steps, steps);
        self.strip.set_offset_steps(-to_steps(steps));

        let reenable = self.options.reenable_delay_ms;
        self.schedule(reenable, Deferred::ReleaseClones);
        self.schedule(
            self.options.duration_ms.max(reenable),
            Deferred::SettleBackward { origin },
        );
    }

    /// Bounded strips never reorder: the offset tracks the active index.
    fn begin_bounded(&mut self, origin: Origin) {
        self.strip.set_animated(true);
        self.strip.set_offset_steps(-to_steps(self.active_index));
        self.schedule(self.options.duration_ms, Deferred::SettleBounded { origin });
    }

    fn run(&mut self, deferred: Deferred) {
        trace!("deferral {deferred:?} at {}", self.now);
        match deferred {
            Deferred::SettleForward { steps, origin } => {
                self.strip.rotate_to_end(steps);
                self.strip.set_animated(false);
                self.strip.set_offset_steps(0);
                self.settle(origin);
            }
            Deferred::ReleaseClones => {
                self.strip.set_animated(true);
                self.strip.remove_clones();
                self.schedule(0, Deferred::SlideIn);
            }
            Deferred::SlideIn => self.strip.set_offset_steps(0),
            Deferred::SettleBackward { origin } => {
                // A re-enable delay equal to the duration queues the slide-in
                // behind this settle; snap to rest instead of waiting.
                self.strip.remove_clones();
                self.strip.set_offset_steps(0);
                self.settle(origin);
            }
            Deferred::SettleBounded { origin } => self.settle(origin),
            Deferred::AutoplayInstall => {
                let delay = self.options.autoplay_delay_ms;
                self.autoplay = Some(self.timers.schedule_repeating(
                    self.now.saturating_add(delay),
                    delay,
                    Deferred::AutoplayTick,
                ));
            }
            Deferred::AutoplayTick => self.next(),
        }
    }

    /// Ends the transition in flight: drops its leftover deferrals, releases
    /// its guard flag and re-synchronizes the active markers.
    fn settle(&mut self, origin: Origin) {
        for id in self.in_flight.drain(..) {
            self.timers.cancel(id);
        }
        match origin {
            Origin::Step => self.is_moving = false,
            Origin::Jump => self.is_jumping = false,
        }
        self.point_slide_active();
        self.point_dot_active(self.active_index);
    }

    fn point_slide_active(&mut self) {
        let position = self.strip.viewport_position();
        self.strip.mark_active_at(position);
    }

    fn point_dot_active(&mut self, index: usize) {
        if let Some(dots) = self.dots.as_mut() {
            dots.point(index);
        }
    }
}

fn to_steps(count: usize) -> isize {
    isize::try_from(count).unwrap_or(isize::MAX)
}
