//! Playback tests for `flipbook-rs`, driving animations end to end through timers.

mod screen;
mod sessions;

use flipbook_rs::prelude::*;

/// Screen of the classic watch face
pub const SCREEN: Size = Size::new(144, 168);

/// Frame `n` is a white vertical bar at column `4n`, so the composed screen tells which
/// frame is showing.
pub fn bar_frames(count: u32) -> impl Iterator<Item = ImageData> {
	(0..count).map(|n| {
		ImageData::from_fn(SCREEN.w, 16, move |x, _| {
			image::Luma([if x / 4 == n { 255 } else { 0 }])
		})
	})
}

/// Returns the index of the bar lit on `screen`, if exactly one is.
pub fn lit_bar(screen: &ImageData) -> Option<u32> {
	let lit: Vec<u32> = (0..screen.width() / 4)
		.filter(|bar| screen.get_pixel(bar * 4, 0).0[0] == 255)
		.collect();
	match lit.as_slice() {
		[bar] => Some(*bar),
		_ => None,
	}
}

/// Runs `player` until its session ends, composing the screen after every redraw.
///
/// Returns the bar seen on each redraw and the virtual time of the last event.
pub fn play_to_end(
	display: &mut LayerTree,
	store: &mut MemoryStore,
	timers: &mut ManualScheduler,
	player: &mut Player,
	stop_after: Option<usize>,
) -> (Vec<Option<u32>>, u64) {
	let root = display.root();
	let mut seen = Vec::new();
	while player.is_playing() {
		for (_, cookie) in timers.advance_to_next() {
			player.handle_timer(display, store, timers, cookie).unwrap();
		}
		if display.take_dirty(root) {
			seen.push(lit_bar(&display.compose(&*store)));
		}
		if stop_after == Some(seen.len()) {
			player.stop();
		}
	}
	(seen, timers.now_ms())
}
