// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use std::time::Duration;
use understory_timing::TimerQueue;

fn bench_schedule_and_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing/schedule_drain");

    for len in [16usize, 256, 4_096] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter_batched(
                TimerQueue::<u64>::new,
                |mut timers| {
                    // Interleave deadlines so inserts do not arrive sorted.
                    for i in 0..len as u64 {
                        timers.schedule_at((i * 7_919) % 1_000, i);
                    }
                    let mut sum = 0_u64;
                    while let Some(fired) = timers.pop_due(1_000) {
                        sum += fired.payload;
                    }
                    black_box(sum);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing/cancel");

    for len in [256usize, 4_096] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter_batched(
                || {
                    let mut timers = TimerQueue::new();
                    let ids: Vec<_> = (0..len as u64).map(|i| timers.schedule_at(i, ())).collect();
                    (timers, ids)
                },
                |(mut timers, ids)| {
                    for id in ids.into_iter().step_by(2) {
                        black_box(timers.cancel(id));
                    }
                    black_box(timers.len());
                },
                BatchSize::SmallInput,
            );
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
    targets = bench_schedule_and_drain, bench_cancel
}
criterion_main!(benches);
