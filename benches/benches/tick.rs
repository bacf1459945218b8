//! Benchmark suite for the animation tick path
//!
//! This benchmark measures the cost of a tick (release, load, attach, mark dirty) in both
//! playback modes, and of composing the screen afterwards.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use flipbook_benches::{Bench, SCREEN};
use flipbook_types::prelude::*;

/// Benchmark a full looping pass in each mode
fn bench_tick(c: &mut Criterion) {
	let mut group = c.benchmark_group("tick");

	for (name, mode) in [("linear", PlaybackMode::Linear), ("alternating", PlaybackMode::Alternating)]
	{
		for transparent in [false, true] {
			let mut bench = Bench::new(12, transparent);
			let options = PlaybackOptions::new(mode, 20, true);
			if let Err(e) = bench.animation.start() {
				panic!("Failed to start: {e}");
			}

			let id = if transparent { format!("{name}_transparent") } else { name.to_owned() };
			group.throughput(Throughput::Elements(1));
			group.bench_function(BenchmarkId::new("continuous", id), |b| {
				b.iter(|| {
					let outcome = bench.animation.tick(&mut bench.display, &mut bench.store, &options);
					black_box(outcome)
				});
			});

			bench.finish();
		}
	}

	group.finish();
}

/// Benchmark a tick through the timer driver
fn bench_player(c: &mut Criterion) {
	let mut group = c.benchmark_group("player");

	let Bench {
		mut display,
		mut store,
		animation,
	} = Bench::new(12, false);
	let mut timers = ManualScheduler::new();
	let options = PlaybackOptions::new(PlaybackMode::Linear, 20, true);
	let mut player = match Player::new(animation, options, 1) {
		Ok(player) => player,
		Err(e) => panic!("Failed to build player: {e}"),
	};
	if let Err(e) = player.play(&mut timers, 0) {
		panic!("Failed to play: {e}");
	}

	group.bench_function("handle_timer", |b| {
		b.iter(|| {
			for (_, cookie) in timers.advance_to_next() {
				black_box(player.handle_timer(&mut display, &mut store, &mut timers, cookie)).ok();
			}
		});
	});

	group.finish();
	player.teardown(&mut display, &mut store, &mut timers);
}

/// Benchmark composing the screen with the animation on it
fn bench_compose(c: &mut Criterion) {
	let mut group = c.benchmark_group("compose");
	group.throughput(Throughput::Elements(u64::from(SCREEN.w) * u64::from(SCREEN.h)));

	for transparent in [false, true] {
		let bench = Bench::new(1, transparent);
		let name = if transparent { "transparent" } else { "opaque" };
		group.bench_function(name, |b| {
			b.iter(|| black_box(bench.display.compose(&bench.store)));
		});
		bench.finish();
	}

	group.finish();
}

criterion_group!(benches, bench_tick, bench_player, bench_compose);
criterion_main!(benches);
