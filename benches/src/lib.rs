//! Benchmark helper utilities for flipbook-rs
//!
//! This module provides synthetic frame sets and a ready-to-tick screen so the benchmarks
//! measure the engine rather than image decoding.

use flipbook_types::prelude::*;
use image::Luma;

/// Screen of the classic watch face
pub const SCREEN: Size = Size::new(144, 168);

/// Generates `count` frames of `size`, each with a different diagonal stripe pattern.
pub fn synthetic_frames(count: u32, size: Size) -> Vec<ImageData> {
	(0..count)
		.map(|n| {
			ImageData::from_fn(size.w, size.h, |x, y| {
				Luma([if (x + y + n * 3) % 8 < 4 { 255 } else { 0 }])
			})
		})
		.collect()
}

/// A screen hosting one animation, ready for a play session.
pub struct Bench {
	/// Layer tree of the screen
	pub display: LayerTree,
	/// Frame store
	pub store: MemoryStore,
	/// Animation attached to the root layer
	pub animation: Animation,
}

impl Bench {
	/// Builds a screen with `num_frames` full-width frames starting at resource 1.
	///
	/// Transparent animations get an image and a mask per frame.
	pub fn new(num_frames: u32, transparent: bool) -> Self {
		let frame_size = Size::new(SCREEN.w, SCREEN.h / 2);
		let per_frame = if transparent { 2 } else { 1 };
		let mut display = LayerTree::new(SCREEN);
		let mut store =
			MemoryStore::with_frames(1, synthetic_frames(num_frames * per_frame, frame_size));
		let root = display.root();
		let config = AnimationConfig::new(1, num_frames).transparent(transparent);
		let animation = match Animation::new(&mut display, &mut store, root, &config) {
			Ok(animation) => animation,
			Err(e) => panic!("Failed to build benchmark animation: {e}"),
		};
		Self {
			display,
			store,
			animation,
		}
	}

	/// Releases the animation's frame.
	pub fn finish(self) {
		let Self {
			mut display,
			mut store,
			animation,
		} = self;
		animation.deinit(&mut display, &mut store);
	}
}
