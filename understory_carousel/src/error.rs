// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by carousel construction and index-targeted moves.
//!
//! Guarded no-ops (a transition already in flight, a non-looping carousel at
//! its boundary, autoplay already running) are expected steady-state outcomes
//! and are not represented here.

use core::fmt;

/// A carousel could not be constructed from the supplied root and options.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigurationError {
    /// No root container was supplied.
    MissingRoot,
    /// The root container has no children to turn into slides.
    NoSlides,
    /// The measured root width is not a finite, positive number.
    InvalidSize {
        /// The measured width.
        width: f64,
        /// The measured height.
        height: f64,
    },
    /// The autoplay interval is zero.
    ZeroAutoplayDelay,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRoot => f.write_str("carousel root container is missing"),
            Self::NoSlides => f.write_str("carousel root container has no slides"),
            Self::InvalidSize { width, height } => {
                write!(f, "carousel root has an unusable size {width}x{height}")
            }
            Self::ZeroAutoplayDelay => f.write_str("autoplay requires a non-zero delay"),
        }
    }
}

impl core::error::Error for ConfigurationError {}

/// [`Carousel::move_at`](crate::Carousel::move_at) was given an index outside
/// `0..slide_count`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InvalidIndexError {
    /// The requested index.
    pub index: usize,
    /// The number of slides in the carousel.
    pub slide_count: usize,
}

impl fmt::Display for InvalidIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slide index {} is out of range for a carousel of {} slides",
            self.index, self.slide_count
        )
    }
}

impl core::error::Error for InvalidIndexError {}
