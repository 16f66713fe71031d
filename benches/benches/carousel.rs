// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use std::time::Duration;
use understory_carousel::{Carousel, CarouselOptions, Markup, RootElement, SlideElement};

fn root(count: usize) -> RootElement {
    (0..count).fold(RootElement::new("div", Size::new(640.0, 360.0)), |root, i| {
        root.with_child(SlideElement::new("div").with_html(format!("<img src=\"{i}.jpg\">")))
    })
}

fn build(root: &RootElement) -> Carousel {
    Carousel::builder()
        .root(root.metrics())
        .options(
            CarouselOptions::default()
                .with_autoplay(false)
                .with_duration_ms(10),
        )
        .build()
        .expect("valid root")
}

fn bench_full_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/full_cycle");

    // Hypothesis: reflow cost is linear in slide count (rotations touch every handle).
    for count in [4usize, 32, 256] {
        let root = root(count);
        group.bench_with_input(BenchmarkId::new("next", count), &root, |b, root| {
            let mut carousel = build(root);
            b.iter(|| {
                for _ in 0..count {
                    carousel.next();
                    carousel.advance_by(10);
                }
                black_box(carousel.active_index());
            });
        });
        group.bench_with_input(BenchmarkId::new("prev", count), &root, |b, root| {
            let mut carousel = build(root);
            b.iter(|| {
                for _ in 0..count {
                    carousel.prev();
                    carousel.advance_by(10);
                }
                black_box(carousel.active_index());
            });
        });
    }

    group.finish();
}

fn bench_markup_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/markup_sync");

    for count in [4usize, 32, 256] {
        let root = root(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &root, |b, root| {
            let mut carousel = build(root);
            let mut markup = Markup::new(root.clone(), &carousel);
            b.iter(|| {
                carousel.move_at(count - 1).expect("in range");
                markup.sync(&carousel);
                carousel.advance_by(10);
                carousel.move_at(0).expect("in range");
                markup.sync(&carousel);
                carousel.advance_by(10);
                markup.sync(&carousel);
                black_box(markup.element(markup.strip()).children().len());
            });
        });
    }

    group.finish();
}

fn config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_millis(300))
        .measurement_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = config();
    targets = bench_full_cycle, bench_markup_sync
}
criterion_main!(benches);
