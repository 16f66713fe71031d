// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slide strip: slides in render order, the strip offset, and active markers.
//!
//! The strip is pure data. Moving a slide means reordering this sequence;
//! hosts render whatever order, offset and markers it currently holds.
//!
//! ```rust
//! use understory_carousel::{SlideId, SlideStrip};
//!
//! let mut strip = SlideStrip::new(3, 100.0);
//! strip.rotate_to_end(1);
//! assert_eq!(
//!     strip.order().collect::<Vec<_>>(),
//!     [SlideId::new(1), SlideId::new(2), SlideId::new(0)]
//! );
//!
//! // Mask a backward move: bring the last slide to the front and keep a copy
//! // of the previously leading slide in the viewport.
//! strip.rotate_to_start(1);
//! strip.insert_clone_at(1, 1);
//! strip.set_offset_steps(-1);
//! assert_eq!(strip.slide_in_viewport().map(|s| s.is_clone), Some(true));
//! assert_eq!(strip.offset(), -100.0);
//! ```

use alloc::vec::Vec;

/// Identity of one original child of the carousel root.
///
/// The wrapped ordinal is the child's position in the root before the
/// carousel touched it, which is also its logical slide index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlideId(usize);

impl SlideId {
    /// Creates an id for the child at `ordinal`.
    #[must_use]
    pub const fn new(ordinal: usize) -> Self {
        Self(ordinal)
    }

    /// Returns the logical slide index.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self.0
    }
}

/// One slide handle in the strip.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    /// The original child this handle renders.
    pub id: SlideId,
    /// Carries the active marker.
    pub active: bool,
    /// Transient duplicate used to mask a reorder.
    pub is_clone: bool,
}

/// Ordered slide handles plus the horizontal offset of the strip.
///
/// The offset is kept in whole steps of [`item_width`](Self::item_width); a
/// strip at rest shows the slide at [`viewport_position`](Self::viewport_position).
#[derive(Clone, Debug)]
pub struct SlideStrip {
    slides: Vec<Slide>,
    count: usize,
    offset_steps: isize,
    item_width: f64,
    animated: bool,
}

impl SlideStrip {
    /// Creates a strip of `count` slides in their original order, at offset zero.
    #[must_use]
    pub fn new(count: usize, item_width: f64) -> Self {
        Self {
            slides: (0..count)
                .map(|ordinal| Slide {
                    id: SlideId(ordinal),
                    active: false,
                    is_clone: false,
                })
                .collect(),
            count,
            offset_steps: 0,
            item_width,
            animated: false,
        }
    }

    /// Returns the number of real (non-clone) slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the strip holds no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns every handle in render order, clones included.
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Iterates real slides in render order.
    pub fn order(&self) -> impl Iterator<Item = SlideId> + '_ {
        self.slides.iter().filter(|s| !s.is_clone).map(|s| s.id)
    }

    /// Returns the number of clones currently in the strip.
    #[must_use]
    pub fn clone_count(&self) -> usize {
        self.slides.len() - self.count
    }

    /// Returns the uniform slide width.
    #[must_use]
    pub fn item_width(&self) -> f64 {
        self.item_width
    }

    /// Returns the offset in steps; negative values move the strip left.
    #[must_use]
    pub fn offset_steps(&self) -> isize {
        self.offset_steps
    }

    /// Returns the offset in pixels.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset_steps as f64 * self.item_width
    }

    /// Sets the offset in steps.
    pub fn set_offset_steps(&mut self, steps: isize) {
        self.offset_steps = steps;
    }

    /// Returns `true` if offset changes should animate.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// Enables or disables animation of offset changes.
    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
    }

    /// Moves the first `n` handles to the end, keeping their relative order.
    pub fn rotate_to_end(&mut self, n: usize) {
        debug_assert_eq!(self.clone_count(), 0, "rotating a strip with live clones");
        if !self.slides.is_empty() {
            let n = n % self.slides.len();
            self.slides.rotate_left(n);
        }
    }

    /// Moves the last `n` handles to the front, keeping their relative order.
    pub fn rotate_to_start(&mut self, n: usize) {
        debug_assert_eq!(self.clone_count(), 0, "rotating a strip with live clones");
        if !self.slides.is_empty() {
            let n = n % self.slides.len();
            self.slides.rotate_right(n);
        }
    }

    /// Inserts a clone of the handle currently at `source` so that it ends up
    /// at position `at`. Returns the cloned slide's id.
    ///
    /// # Panics
    ///
    /// Panics if `source` is out of bounds or `at` is greater than the number
    /// of handles.
    pub fn insert_clone_at(&mut self, at: usize, source: usize) -> SlideId {
        let mut clone = self.slides[source];
        clone.is_clone = true;
        self.slides.insert(at, clone);
        clone.id
    }

    /// Removes every clone, returning how many were removed.
    pub fn remove_clones(&mut self) -> usize {
        let before = self.slides.len();
        self.slides.retain(|s| !s.is_clone);
        before - self.slides.len()
    }

    /// Returns the handle position the offset places in the viewport.
    #[must_use]
    pub fn viewport_position(&self) -> usize {
        let position = usize::try_from(self.offset_steps.saturating_neg()).unwrap_or(0);
        position.min(self.slides.len().saturating_sub(1))
    }

    /// Returns the handle currently in the viewport.
    #[must_use]
    pub fn slide_in_viewport(&self) -> Option<&Slide> {
        self.slides.get(self.viewport_position())
    }

    /// Puts the active marker on the handle at `position` and clears it everywhere else.
    pub fn mark_active_at(&mut self, position: usize) {
        for (i, slide) in self.slides.iter_mut().enumerate() {
            slide.active = i == position;
        }
    }

    /// Returns the real slide carrying the active marker.
    #[must_use]
    pub fn active(&self) -> Option<SlideId> {
        self.slides
            .iter()
            .find(|s| s.active && !s.is_clone)
            .map(|s| s.id)
    }

    /// Returns the render position of a real slide.
    #[must_use]
    pub fn position_of(&self, id: SlideId) -> Option<usize> {
        self.slides
            .iter()
            .position(|s| s.id == id && !s.is_clone)
    }
}

/// Dot indicators: one per slide, at most one active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DotStrip {
    count: usize,
    active: Option<usize>,
}

impl DotStrip {
    /// Creates `count` inactive dots.
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self {
            count,
            active: None,
        }
    }

    /// Returns the number of dots.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if there are no dots.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the index of the active dot.
    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    /// Returns `true` if the dot at `index` is active.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Activates the dot at `index` and deactivates the rest.
    ///
    /// An out-of-range index leaves every dot inactive.
    pub fn point(&mut self, index: usize) {
        self.active = (index < self.count).then_some(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(strip: &SlideStrip) -> Vec<usize> {
        strip.slides().iter().map(|s| s.id.ordinal()).collect()
    }

    #[test]
    fn rotations_are_inverse() {
        let mut strip = SlideStrip::new(4, 10.0);
        strip.rotate_to_end(3);
        assert_eq!(ids(&strip), [3, 0, 1, 2]);
        strip.rotate_to_start(3);
        assert_eq!(ids(&strip), [0, 1, 2, 3]);
    }

    #[test]
    fn backward_mask_layout() {
        // [a, b, c, d] -> prepend {c, d} and a clone of a.
        let mut strip = SlideStrip::new(4, 10.0);
        strip.mark_active_at(0);
        strip.rotate_to_start(2);
        let cloned = strip.insert_clone_at(2, 2);
        assert_eq!(cloned, SlideId::new(0));
        assert_eq!(ids(&strip), [2, 3, 0, 0, 1]);
        assert_eq!(strip.clone_count(), 1);
        assert_eq!(strip.len(), 4);

        strip.set_offset_steps(-2);
        let shown = strip.slide_in_viewport().unwrap();
        assert!(shown.is_clone);
        assert!(shown.active, "clones copy the active marker");
        assert_eq!(strip.active(), Some(SlideId::new(0)));

        assert_eq!(strip.remove_clones(), 1);
        assert_eq!(ids(&strip), [2, 3, 0, 1]);
        assert_eq!(strip.slide_in_viewport().map(|s| s.id), Some(SlideId::new(0)));
    }

    #[test]
    fn viewport_position_is_clamped() {
        let mut strip = SlideStrip::new(3, 10.0);
        strip.set_offset_steps(2);
        assert_eq!(strip.viewport_position(), 0);
        strip.set_offset_steps(-7);
        assert_eq!(strip.viewport_position(), 2);
    }

    #[test]
    fn mark_active_is_exclusive() {
        let mut strip = SlideStrip::new(3, 10.0);
        strip.mark_active_at(1);
        strip.mark_active_at(2);
        assert_eq!(strip.slides().iter().filter(|s| s.active).count(), 1);
        assert_eq!(strip.active(), Some(SlideId::new(2)));
        assert_eq!(strip.position_of(SlideId::new(2)), Some(2));
    }

    #[test]
    fn dots_point_exclusively() {
        let mut dots = DotStrip::new(3);
        assert_eq!(dots.active(), None);
        dots.point(1);
        assert!(dots.is_active(1));
        assert!(!dots.is_active(0));
        dots.point(9);
        assert_eq!(dots.active(), None);
    }
}
