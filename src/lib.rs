#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `flipbook-rs` plays frame-by-frame bitmap animations on small timer-driven displays.
//!
//! An animation cycles numbered images inside a layer of a screen, forward only or back and
//! forth, once or in a loop. The engine never owns a timer: each tick reports the delay before
//! the next one, and whoever drives it arms its own timer.
//!
//! ```
//! use flipbook_rs::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut display = LayerTree::new(Size::new(144, 168));
//! let mut store = MemoryStore::with_frames(1, (0..12).map(|_| ImageData::new(144, 100)));
//! let mut timers = ManualScheduler::new();
//!
//! let root = display.root();
//! let anim = Animation::new(&mut display, &mut store, root, &AnimationConfig::new(1, 12))?;
//! let mut player = Player::new(anim, PlaybackOptions::default(), 1)?;
//! player.play(&mut timers, 100)?;
//!
//! while player.is_playing() {
//! 	for (_, cookie) in timers.advance_to_next() {
//! 		player.handle_timer(&mut display, &mut store, &mut timers, cookie)?;
//! 	}
//! }
//! player.teardown(&mut display, &mut store, &mut timers);
//! # Ok(())
//! # }
//! ```
pub use flipbook_internal::*;
