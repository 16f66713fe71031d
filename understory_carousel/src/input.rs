// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wires click delegation and drag recognition onto a carousel.

use kurbo::Point;

use crate::drag::DragRecognizer;
use crate::engine::Carousel;
use crate::error::InvalidIndexError;
use crate::markup::{Markup, NodeId};
use crate::options::CarouselOptions;
use crate::trigger::Trigger;

/// Routes host pointer events to a [`Carousel`].
///
/// Clicks anywhere inside the carousel are delegated through
/// [`Markup::trigger_at`]. When the carousel is draggable, a pointer pressed
/// inside the strip arms a [`DragRecognizer`].
///
/// Hosts call [`Markup::sync`] after handling input to pick up the changes.
#[derive(Debug, Clone, Copy)]
pub struct CarouselInput {
    draggable: bool,
    drag: DragRecognizer,
}

impl CarouselInput {
    /// Creates input routing for a carousel built with `options`.
    #[must_use]
    pub fn new(options: &CarouselOptions) -> Self {
        Self {
            draggable: options.draggable,
            drag: DragRecognizer::new(options.drag_threshold),
        }
    }

    /// Handles a click on `target`, returning the trigger that was dispatched.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIndexError`] if the clicked dot names a slide the
    /// carousel does not have.
    pub fn click(
        &mut self,
        markup: &Markup,
        target: NodeId,
        carousel: &mut Carousel,
    ) -> Result<Option<Trigger>, InvalidIndexError> {
        let Some(trigger) = markup.trigger_at(target) else {
            return Ok(None);
        };
        carousel.dispatch(trigger)?;
        Ok(Some(trigger))
    }

    /// Handles pointer down on `target` at `pos`.
    pub fn pointer_down(&mut self, markup: &Markup, target: NodeId, pos: Point) {
        if self.draggable && markup.in_strip(target) {
            self.drag.start(pos);
        }
    }

    /// Handles pointer movement, returning the trigger a completed drag dispatched.
    pub fn pointer_move(&mut self, pos: Point, carousel: &mut Carousel) -> Option<Trigger> {
        let trigger = self.drag.update(pos)?;
        carousel.dispatch(trigger).ok()?;
        Some(trigger)
    }

    /// Handles pointer up.
    pub fn pointer_up(&mut self) {
        self.drag.end();
    }
}
