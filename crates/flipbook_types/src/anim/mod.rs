//! Frame-by-frame animation engine.
//!
//! An [`Animation`] cycles through numbered frame images inside a rectangular layer. The
//! engine decides which frame is current, when to advance, in which direction and when to
//! stop; drawing and timing belong to the caller.
//!
//! # Play sessions
//!
//! ```text
//! Animation::new ──► rest ──start()──► playing ──tick()*──► rest ──► deinit()
//!                     ▲                   │
//!                     └── pass completed ─┘  (not continuous, or stop requested)
//! ```
//!
//! Each tick shows the frame at the cursor, then moves the cursor:
//!
//! - **Linear**: frames `0, 1, .., n-1`. Continuous playback wraps straight back to 0;
//!   otherwise one more tick runs past the last frame and ends the session.
//! - **Alternating**: frames `0, 1, .., n-1, n-2, .., 1` then back to 0 when continuous;
//!   otherwise the pass runs down to frame 0 and one step further before ending.
//!
//! [`Animation::request_stop`] never cuts a pass short: the session ends at the next loop
//! boundary. When a session ends the animation rests on frame 0, or hides if it was
//! configured with `hidden_at_rest`.
//!
//! # Driving an animation
//!
//! ```
//! use flipbook_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut display = LayerTree::new(Size::new(144, 168));
//! let mut store = MemoryStore::with_frames(100, (0..4).map(|_| ImageData::new(8, 8)));
//! let mut timers = ManualScheduler::new();
//!
//! let root = display.root();
//! let config = AnimationConfig::new(100, 4).hidden_at_rest(true);
//! let mut anim = Animation::new(&mut display, &mut store, root, &config)?;
//! let options = PlaybackOptions::new(PlaybackMode::Alternating, 10, false);
//!
//! anim.start()?;
//! let mut timer = Some(timers.send_event(100, 1));
//! while timer.is_some() {
//! 	timers.advance_to_next();
//! 	timer = match anim.tick(&mut display, &mut store, &options)? {
//! 		TickOutcome::Continue { delay_ms } => Some(timers.send_event(delay_ms, 1)),
//! 		TickOutcome::Stopped => None,
//! 	};
//! }
//!
//! assert!(display.is_hidden(anim.layer()));
//! anim.deinit(&mut display, &mut store);
//! # Ok(())
//! # }
//! ```

mod animation;
mod options;


pub use animation::{Animation, AnimationState};
pub use options::{
	AnimationConfig, MAX_FPS, PlaybackMode, PlaybackOptions, TickOutcome, frame_delay_ms,
};
