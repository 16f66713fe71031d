// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal drag recognition.
//!
//! ## Usage
//!
//! 1) Call [`DragRecognizer::start`] on pointer down inside the slide strip.
//! 2) Feed every pointer move to [`DragRecognizer::update`]; it yields at most
//!    one [`Trigger`] per gesture, once horizontal travel exceeds the threshold.
//! 3) Call [`DragRecognizer::end`] on pointer up.
//!
//! ```
//! use kurbo::Point;
//! use understory_carousel::{DragRecognizer, Trigger};
//!
//! let mut drag = DragRecognizer::new(35.0);
//! drag.start(Point::new(200.0, 10.0));
//! assert_eq!(drag.update(Point::new(180.0, 12.0)), None);
//!
//! // Pulling the strip left past the threshold reveals the next slide.
//! assert_eq!(drag.update(Point::new(150.0, 12.0)), Some(Trigger::Next));
//!
//! // The gesture is spent until the next `start`.
//! assert_eq!(drag.update(Point::new(0.0, 12.0)), None);
//! ```

use kurbo::Point;

use crate::trigger::Trigger;

/// Turns a horizontal pointer drag into a single next/previous trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRecognizer {
    threshold: f64,
    start_pos: Option<Point>,
}

impl DragRecognizer {
    /// Creates a recognizer firing after `threshold` pixels of horizontal travel.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_pos: None,
        }
    }

    /// Returns the travel threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Arms the recognizer at the pointer-down position.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
    }

    /// Checks a pointer move against the start position.
    ///
    /// Travel to the right beyond the threshold yields [`Trigger::Prev`], to the
    /// left [`Trigger::Next`]. Either disarms the recognizer.
    pub fn update(&mut self, pos: Point) -> Option<Trigger> {
        let start = self.start_pos?;
        let travel = pos.x - start.x;
        let trigger = if travel > self.threshold {
            Trigger::Prev
        } else if travel < -self.threshold {
            Trigger::Next
        } else {
            return None;
        };
        self.start_pos = None;
        Some(trigger)
    }

    /// Disarms the recognizer.
    pub fn end(&mut self) {
        self.start_pos = None;
    }

    /// Returns `true` between [`start`](Self::start) and the first trigger or [`end`](Self::end).
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.start_pos.is_some()
    }
}
