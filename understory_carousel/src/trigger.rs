// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed triggers produced by adapters and consumed by [`Carousel::dispatch`](crate::Carousel::dispatch).

/// A request to run one of the carousel's navigation operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// [`Carousel::next`](crate::Carousel::next).
    Next,
    /// [`Carousel::prev`](crate::Carousel::prev).
    Prev,
    /// [`Carousel::move_at`](crate::Carousel::move_at) with the given index.
    MoveTo(usize),
}

impl Trigger {
    /// Parses a `data-action` name and, for `moveAt`, its `data-order` index.
    ///
    /// Returns `None` for unknown actions and for `moveAt` without a valid
    /// non-negative index.
    ///
    /// ```rust
    /// use understory_carousel::Trigger;
    ///
    /// assert_eq!(Trigger::from_action("next", None), Some(Trigger::Next));
    /// assert_eq!(Trigger::from_action("moveAt", Some("2")), Some(Trigger::MoveTo(2)));
    /// assert_eq!(Trigger::from_action("moveAt", Some("-1")), None);
    /// assert_eq!(Trigger::from_action("play", None), None);
    /// ```
    #[must_use]
    pub fn from_action(action: &str, order: Option<&str>) -> Option<Self> {
        match action {
            "next" => Some(Self::Next),
            "prev" => Some(Self::Prev),
            "moveAt" => order?.trim().parse().ok().map(Self::MoveTo),
            _ => None,
        }
    }

    /// Returns the `data-action` name for this trigger.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
            Self::MoveTo(_) => "moveAt",
        }
    }
}
