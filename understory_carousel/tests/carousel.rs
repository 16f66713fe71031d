// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_carousel` engine.
//!
//! These drive the engine through its public operations and a host-supplied
//! clock, checking active markers, strip order and guard flags.

use kurbo::Size;
use understory_carousel::{
    Carousel, CarouselOptions, ConfigurationError, InvalidIndexError, LoopStrategy, RootMetrics,
    SlideId, Trigger,
};

const DURATION: u64 = 300;

fn options() -> CarouselOptions {
    CarouselOptions::default()
        .with_duration_ms(DURATION)
        .with_autoplay(false)
}

fn carousel(count: usize, options: CarouselOptions) -> Carousel {
    Carousel::builder()
        .root(RootMetrics::new(Size::new(300.0, 200.0), count))
        .options(options)
        .build()
        .unwrap()
}

fn order(carousel: &Carousel) -> Vec<usize> {
    carousel.strip().order().map(SlideId::ordinal).collect()
}

/// Runs one operation and lets it settle.
fn settle(carousel: &mut Carousel, op: impl FnOnce(&mut Carousel)) {
    op(carousel);
    carousel.advance_by(DURATION);
}

fn assert_single_markers(carousel: &Carousel) {
    assert!(!carousel.is_moving() && !carousel.is_jumping());
    let active_slides = carousel.strip().slides().iter().filter(|s| s.active).count();
    assert_eq!(active_slides, 1, "exactly one active slide at rest");
    assert_eq!(carousel.strip().clone_count(), 0, "no clones at rest");
    assert_eq!(
        carousel.strip().active(),
        Some(SlideId::new(carousel.active_index())),
        "active marker matches active index"
    );
    if let Some(dots) = carousel.dots() {
        assert_eq!(dots.active(), Some(carousel.active_index()));
    }
}

#[test]
fn construction_marks_first_slide_and_dot() {
    let carousel = carousel(3, options());
    assert_eq!(carousel.active_index(), 0);
    assert_eq!(carousel.slide_count(), 3);
    assert_eq!(carousel.item_width(), 300.0);
    assert_eq!(carousel.offset(), 0.0);
    assert!(carousel.is_paused());
    assert!(!carousel.is_autoplay_running());
    assert_eq!(carousel.next_deadline(), None);
    assert_single_markers(&carousel);
}

#[test]
fn missing_root_is_a_configuration_error() {
    let err = Carousel::builder().options(options()).build().unwrap_err();
    assert_eq!(err, ConfigurationError::MissingRoot);
}

#[test]
fn unusable_roots_are_rejected() {
    let empty = Carousel::builder()
        .root(RootMetrics::new(Size::new(300.0, 200.0), 0))
        .build()
        .unwrap_err();
    assert_eq!(empty, ConfigurationError::NoSlides);

    let unmeasured = Carousel::builder()
        .root(RootMetrics::new(Size::new(0.0, 200.0), 2))
        .build()
        .unwrap_err();
    assert!(matches!(unmeasured, ConfigurationError::InvalidSize { .. }));

    let zero_delay = Carousel::builder()
        .root(RootMetrics::new(Size::new(300.0, 200.0), 2))
        .options(CarouselOptions::default().with_autoplay_delay_ms(0))
        .build()
        .unwrap_err();
    assert_eq!(zero_delay, ConfigurationError::ZeroAutoplayDelay);

    // `play` could start autoplay later, so the delay is checked without it.
    let zero_delay_paused = Carousel::builder()
        .root(RootMetrics::new(Size::new(300.0, 200.0), 2))
        .options(options().with_autoplay_delay_ms(0))
        .build()
        .unwrap_err();
    assert_eq!(zero_delay_paused, ConfigurationError::ZeroAutoplayDelay);
}

#[test]
fn three_slide_scenario() {
    let mut carousel = carousel(3, options().with_loop(true));

    carousel.next();
    carousel.advance_to(299);
    assert!(carousel.is_moving(), "still in flight before the duration");
    carousel.advance_to(300);
    assert_eq!(carousel.active_index(), 1);
    let dots = carousel.dots().unwrap();
    assert!(dots.is_active(1));
    assert!(!dots.is_active(0));
    assert_single_markers(&carousel);

    settle(&mut carousel, Carousel::next);
    assert_eq!(carousel.active_index(), 2);
    settle(&mut carousel, Carousel::next);
    assert_eq!(carousel.active_index(), 0);
    assert_single_markers(&carousel);
}

#[test]
fn next_slides_one_step_then_reflows() {
    let mut carousel = carousel(3, options());
    carousel.next();
    assert_eq!(carousel.offset(), -300.0);
    assert!(carousel.strip().is_animated());
    assert_eq!(order(&carousel), [0, 1, 2], "order holds during the slide");

    carousel.advance_by(DURATION);
    assert_eq!(carousel.offset(), 0.0);
    assert!(!carousel.strip().is_animated());
    assert_eq!(order(&carousel), [1, 2, 0]);
}

#[test]
fn looping_next_round_trip_restores_order() {
    for count in 2..=6 {
        let mut carousel = carousel(count, options());
        let original = order(&carousel);
        for _ in 0..count {
            settle(&mut carousel, Carousel::next);
            assert_single_markers(&carousel);
        }
        assert_eq!(carousel.active_index(), 0);
        assert_eq!(order(&carousel), original);
    }
}

#[test]
fn looping_prev_round_trip_restores_order() {
    let mut carousel = carousel(4, options());
    for expected in [3, 2, 1, 0] {
        settle(&mut carousel, Carousel::prev);
        assert_eq!(carousel.active_index(), expected);
        assert_single_markers(&carousel);
    }
    assert_eq!(order(&carousel), [0, 1, 2, 3]);
}

#[test]
fn prev_after_construction_wraps_to_last_when_looping() {
    let mut carousel = carousel(4, options());
    settle(&mut carousel, Carousel::prev);
    assert_eq!(carousel.active_index(), 3);
    assert_single_markers(&carousel);
}

#[test]
fn prev_after_construction_is_ignored_without_loop() {
    let mut carousel = carousel(4, options().with_loop(false));
    carousel.prev();
    assert!(!carousel.is_moving());
    assert_eq!(carousel.next_deadline(), None);
    assert_eq!(carousel.active_index(), 0);
    assert_single_markers(&carousel);
}

#[test]
fn next_at_last_slide_is_ignored_without_loop() {
    let mut carousel = carousel(2, options().with_loop(false));
    settle(&mut carousel, Carousel::next);
    assert_eq!(carousel.active_index(), 1);
    carousel.next();
    assert!(!carousel.is_moving());
    assert_eq!(carousel.active_index(), 1);
}

#[test]
fn prev_masks_the_reorder_with_a_clone() {
    let mut carousel = carousel(3, options());
    carousel.prev();

    // [last, clone(first), first, second], offset one step left: the clone
    // sits in the viewport while the transition is off.
    let strip = carousel.strip();
    assert_eq!(strip.slides().len(), 4);
    assert!(strip.slide_in_viewport().unwrap().is_clone);
    assert!(!strip.is_animated());
    assert_eq!(carousel.offset(), -300.0);

    // The zero re-enable delay drops the clone and slides in right away.
    carousel.advance_by(0);
    assert_eq!(carousel.strip().clone_count(), 0);
    assert!(carousel.strip().is_animated());
    assert_eq!(carousel.offset(), 0.0);
    assert!(carousel.is_moving());

    carousel.advance_by(DURATION);
    assert_eq!(order(&carousel), [2, 0, 1]);
    assert_single_markers(&carousel);
}

#[test]
fn reenable_delay_holds_the_clone() {
    let mut carousel = carousel(3, options().with_reenable_delay_ms(100));
    carousel.prev();
    carousel.advance_to(99);
    assert_eq!(carousel.strip().clone_count(), 1);
    assert!(!carousel.strip().is_animated());
    carousel.advance_to(100);
    assert_eq!(carousel.strip().clone_count(), 0);
    assert_eq!(carousel.offset(), 0.0);
    carousel.advance_to(DURATION);
    assert_single_markers(&carousel);
}

#[test]
fn reenable_delay_longer_than_duration_still_settles_cleanly() {
    let mut carousel = carousel(3, options().with_reenable_delay_ms(DURATION));
    carousel.prev();
    carousel.advance_to(DURATION);
    assert_eq!(carousel.active_index(), 2);
    assert_single_markers(&carousel);
}

#[test]
fn rapid_next_runs_one_transition() {
    let mut carousel = carousel(3, options());
    carousel.next();
    carousel.next();
    carousel.prev();
    carousel.advance_by(DURATION);
    assert_eq!(carousel.active_index(), 1);
    assert_eq!(order(&carousel), [1, 2, 0]);
    assert_eq!(carousel.next_deadline(), None);
}

#[test]
fn move_at_forward_moves_a_block() {
    let mut carousel = carousel(5, options());
    carousel.move_at(3).unwrap();
    assert!(carousel.is_jumping());
    assert!(!carousel.is_moving());
    assert_eq!(carousel.offset(), -900.0);
    assert_eq!(carousel.dots().unwrap().active(), Some(3));

    // Steps are blocked while the jump is in flight, and vice versa.
    carousel.next();
    carousel.move_at(1).unwrap();

    carousel.advance_by(DURATION);
    assert_eq!(carousel.active_index(), 3);
    assert_eq!(order(&carousel), [3, 4, 0, 1, 2]);
    assert_single_markers(&carousel);
}

#[test]
fn move_at_backward_moves_a_block() {
    let mut carousel = carousel(5, options());
    carousel.move_at(4).unwrap();
    carousel.advance_by(DURATION);

    carousel.move_at(1).unwrap();
    let strip = carousel.strip();
    assert_eq!(strip.clone_count(), 1);
    assert_eq!(strip.viewport_position(), 3);
    assert!(strip.slide_in_viewport().unwrap().is_clone);

    carousel.advance_by(DURATION);
    assert_eq!(carousel.active_index(), 1);
    assert_eq!(order(&carousel), [1, 2, 3, 4, 0]);
    assert_single_markers(&carousel);
}

#[test]
fn move_at_current_index_is_a_no_op() {
    let mut carousel = carousel(3, options());
    carousel.move_at(0).unwrap();
    assert!(!carousel.is_jumping());
    assert_eq!(carousel.offset(), 0.0);
    assert_eq!(carousel.next_deadline(), None);
    assert_single_markers(&carousel);

    // Nothing was left holding the guard.
    settle(&mut carousel, Carousel::next);
    assert_eq!(carousel.active_index(), 1);
}

#[test]
fn move_at_out_of_range_is_rejected() {
    let mut carousel = carousel(3, options());
    assert_eq!(
        carousel.move_at(3),
        Err(InvalidIndexError {
            index: 3,
            slide_count: 3
        })
    );
    assert_eq!(
        carousel.dispatch(Trigger::MoveTo(7)).unwrap_err().index,
        7
    );
    assert!(!carousel.is_jumping());
}

#[test]
fn single_slide_never_moves() {
    let mut carousel = carousel(1, options());
    carousel.next();
    carousel.prev();
    carousel.move_at(0).unwrap();
    assert!(!carousel.is_moving());
    assert_eq!(carousel.next_deadline(), None);
    assert_single_markers(&carousel);
}

#[test]
fn bounded_strategy_clamps_and_never_reorders() {
    let mut carousel = carousel(
        3,
        options()
            .with_loop(true)
            .with_loop_strategy(LoopStrategy::Bounded),
    );
    carousel.prev();
    assert!(!carousel.is_moving(), "bounded strips never wrap");

    settle(&mut carousel, Carousel::next);
    settle(&mut carousel, Carousel::next);
    assert_eq!(carousel.active_index(), 2);
    assert_eq!(carousel.offset(), -600.0);
    assert_eq!(order(&carousel), [0, 1, 2]);
    assert_single_markers(&carousel);

    carousel.next();
    assert!(!carousel.is_moving());
    assert_eq!(carousel.offset(), -600.0);

    carousel.move_at(0).unwrap();
    carousel.advance_by(DURATION);
    assert_eq!(carousel.offset(), 0.0);
    assert_single_markers(&carousel);
}

#[test]
fn autoplay_advances_on_its_interval() {
    let mut carousel = carousel(
        3,
        options().with_autoplay(true).with_autoplay_delay_ms(1_000),
    );
    assert!(!carousel.is_paused());
    assert!(carousel.is_autoplay_running());

    carousel.advance_to(999);
    assert_eq!(carousel.active_index(), 0);
    carousel.advance_to(1_000);
    assert_eq!(carousel.active_index(), 1);
    carousel.advance_to(2_000);
    assert_eq!(carousel.active_index(), 2);
    carousel.advance_to(3_300);
    assert_eq!(carousel.active_index(), 0);
    assert_single_markers(&carousel);
}

#[test]
fn play_then_pause_cancels_the_first_advance() {
    let mut carousel = carousel(3, options().with_autoplay_delay_ms(500));
    carousel.play();
    carousel.pause();
    assert!(carousel.is_paused());
    assert!(!carousel.is_autoplay_running());
    carousel.advance_to(10_000);
    assert_eq!(carousel.active_index(), 0);
    assert_eq!(carousel.next_deadline(), None);
}

#[test]
fn play_and_pause_are_idempotent() {
    let mut carousel = carousel(3, options().with_autoplay_delay_ms(500));
    carousel.pause();
    assert!(carousel.is_paused());

    carousel.play();
    carousel.play();
    carousel.advance_to(500);
    assert_eq!(carousel.active_index(), 1, "one interval, one advance");

    carousel.pause();
    carousel.pause();
    carousel.advance_to(5_000);
    assert_eq!(carousel.active_index(), 1);
}

fn autoplaying(count: usize) -> Carousel {
    carousel(
        count,
        options()
            .with_autoplay(true)
            .with_autoplay_delay_ms(1_000)
            .with_reenable_delay_ms(100),
    )
}

#[test]
fn pause_finishes_a_forward_transition() {
    let mut carousel = autoplaying(3);
    carousel.advance_to(1_000);
    assert!(carousel.is_moving());

    carousel.pause();
    assert_eq!(carousel.active_index(), 1);
    assert_eq!(order(&carousel), [1, 2, 0]);
    assert_eq!(carousel.offset(), 0.0);
    assert!(!carousel.strip().is_animated());
    assert_eq!(carousel.next_deadline(), None);
    assert_single_markers(&carousel);
}

#[test]
fn pause_during_prev_drops_the_mask() {
    let mut carousel = autoplaying(3);
    carousel.prev();
    carousel.advance_to(50);
    assert_eq!(carousel.strip().clone_count(), 1);

    carousel.pause();
    assert_eq!(carousel.active_index(), 2);
    assert_eq!(order(&carousel), [2, 0, 1]);
    assert_eq!(carousel.offset(), 0.0);
    assert_eq!(carousel.next_deadline(), None);
    assert_single_markers(&carousel);
}

#[test]
fn prev_right_after_pausing_a_prev() {
    let mut carousel = autoplaying(3);
    carousel.prev();
    carousel.advance_to(50);
    carousel.pause();

    carousel.prev();
    assert!(carousel.is_moving());
    assert_eq!(carousel.strip().clone_count(), 1);
    carousel.advance_to(50 + DURATION);
    assert_eq!(carousel.active_index(), 1);
    assert_eq!(order(&carousel), [1, 2, 0]);
    assert_single_markers(&carousel);
}

#[test]
fn pause_during_backward_move_at_drops_the_mask() {
    let mut carousel = autoplaying(4);
    settle(&mut carousel, |c| c.move_at(3).unwrap());
    assert_eq!(order(&carousel), [3, 0, 1, 2]);

    carousel.move_at(1).unwrap();
    assert!(carousel.is_jumping());
    carousel.advance_by(50);
    carousel.pause();
    assert_eq!(carousel.active_index(), 1);
    assert_eq!(order(&carousel), [1, 2, 3, 0]);
    assert_single_markers(&carousel);
}

#[test]
fn transition_started_after_pause_keeps_its_guard() {
    let mut carousel = carousel(4, options().with_autoplay(true).with_autoplay_delay_ms(1_000));
    carousel.advance_to(1_000);
    carousel.pause();

    carousel.advance_to(1_100);
    carousel.next();
    assert!(carousel.is_moving());

    // Nothing left over from the paused transition releases this guard early.
    carousel.advance_to(1_300);
    assert!(carousel.is_moving());

    carousel.advance_to(1_400);
    assert_eq!(carousel.active_index(), 2);
    assert_eq!(order(&carousel), [2, 3, 0, 1]);
    assert_single_markers(&carousel);
}

#[test]
fn clock_never_runs_backwards() {
    let mut carousel = carousel(3, options());
    carousel.advance_to(1_000);
    carousel.next();
    carousel.advance_to(10);
    assert_eq!(carousel.now(), 1_000);
    assert!(carousel.is_moving());
    carousel.advance_to(1_300);
    assert!(!carousel.is_moving());
}

#[test]
fn dots_are_optional() {
    let mut options = options();
    options.dots.display = false;
    let mut carousel = carousel(3, options);
    assert!(carousel.dots().is_none());
    settle(&mut carousel, Carousel::next);
    assert_single_markers(&carousel);
}

#[test]
fn start_time_offsets_every_deadline() {
    let mut carousel = Carousel::builder()
        .root(RootMetrics::new(Size::new(100.0, 100.0), 2))
        .options(options())
        .start_time(5_000)
        .build()
        .unwrap();
    carousel.next();
    assert_eq!(carousel.next_deadline(), Some(5_000 + DURATION));
}
