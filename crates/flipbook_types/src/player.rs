//! Timer-driven playback.
//!
//! [`Player`] ties an [`Animation`] to a [`Scheduler`]: it arms the first timer, ticks the
//! animation whenever its [`Cookie`] comes back and re-arms the timer with the delay the
//! tick reports. This is the wiring a screen's timer callback needs; the animation itself
//! stays timer-agnostic.
//!
//! # Examples
//!
//! ```
//! use flipbook_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut display = LayerTree::new(Size::new(144, 168));
//! let mut store = MemoryStore::with_frames(1, (0..12).map(|_| ImageData::new(144, 100)));
//! let mut timers = ManualScheduler::new();
//!
//! let root = display.root();
//! let anim = Animation::new(&mut display, &mut store, root, &AnimationConfig::new(1, 12))?;
//! let mut player = Player::new(anim, PlaybackOptions::new(PlaybackMode::Linear, 20, true), 1)?;
//! player.play(&mut timers, 100)?;
//!
//! for _ in 0..30 {
//! 	for (_, cookie) in timers.advance_to_next() {
//! 		player.handle_timer(&mut display, &mut store, &mut timers, cookie)?;
//! 	}
//! }
//! assert_eq!(player.animation().frame_index(), 6);
//!
//! player.teardown(&mut display, &mut store, &mut timers);
//! assert_eq!(timers.pending(), 0);
//! assert_eq!(store.outstanding(), 0);
//! # Ok(())
//! # }
//! ```

use log::{debug, trace};

use crate::{
	anim::{Animation, PlaybackOptions, TickOutcome},
	error::AnimationError,
	resource::ResourceStore,
	surface::Display,
	timer::{Cookie, Scheduler, TimerHandle},
};

/// An animation bound to playback options and a timer cookie.
#[derive(Debug)]
pub struct Player {
	animation: Animation,
	options: PlaybackOptions,
	cookie: Cookie,
	timer: Option<TimerHandle>,
}

impl Player {
	/// Binds `animation` to `options`; timer events carrying `cookie` drive it.
	///
	/// # Errors
	///
	/// Returns [`AnimationError::InvalidFps`] if the options carry an out of range rate.
	pub fn new(
		animation: Animation,
		options: PlaybackOptions,
		cookie: Cookie,
	) -> Result<Self, AnimationError> {
		options.validate()?;
		Ok(Self {
			animation,
			options,
			cookie,
			timer: None,
		})
	}

	/// Returns the driven animation.
	pub fn animation(&self) -> &Animation {
		&self.animation
	}

	/// Returns the playback options.
	pub fn options(&self) -> &PlaybackOptions {
		&self.options
	}

	/// Replaces the playback options; they apply from the next tick.
	///
	/// # Errors
	///
	/// Returns [`AnimationError::InvalidFps`] and keeps the current options if the new rate
	/// is out of range.
	pub fn set_options(&mut self, options: PlaybackOptions) -> Result<(), AnimationError> {
		options.validate()?;
		self.options = options;
		Ok(())
	}

	/// Returns the cookie this player answers to.
	pub fn cookie(&self) -> Cookie {
		self.cookie
	}

	/// Returns the armed timer, if any.
	pub fn timer(&self) -> Option<TimerHandle> {
		self.timer
	}

	/// Returns `true` while a play session is active.
	pub fn is_playing(&self) -> bool {
		self.animation.is_playing()
	}

	/// Starts a session and arms the first tick after `initial_delay_ms`.
	///
	/// # Errors
	///
	/// Returns [`AnimationError::AlreadyPlaying`] if a session is active.
	pub fn play<T: Scheduler + ?Sized>(
		&mut self,
		scheduler: &mut T,
		initial_delay_ms: u32,
	) -> Result<(), AnimationError> {
		self.animation.start()?;
		self.timer = Some(scheduler.send_event(initial_delay_ms, self.cookie));
		debug!("Player {} armed, first tick in {} ms", self.cookie, initial_delay_ms);
		Ok(())
	}

	/// Handles a fired timer event.
	///
	/// Events carrying another cookie are ignored and `Ok(false)` is returned. Otherwise the
	/// animation ticks once and the timer is re-armed, or dropped when the session ends.
	///
	/// # Errors
	///
	/// Propagates tick errors. The timer is dropped and the session is over in that case.
	pub fn handle_timer<D, S, T>(
		&mut self,
		display: &mut D,
		store: &mut S,
		scheduler: &mut T,
		cookie: Cookie,
	) -> Result<bool, AnimationError>
	where
		D: Display + ?Sized,
		S: ResourceStore + ?Sized,
		T: Scheduler + ?Sized,
	{
		if cookie != self.cookie {
			trace!("Player {} ignoring cookie {}", self.cookie, cookie);
			return Ok(false);
		}

		// the event that just fired is spent
		self.timer = None;
		match self.animation.tick(display, store, &self.options)? {
			TickOutcome::Continue {
				delay_ms,
			} => {
				self.timer = Some(scheduler.send_event(delay_ms, self.cookie));
			}
			TickOutcome::Stopped => {
				debug!("Player {} finished", self.cookie);
			}
		}
		Ok(true)
	}

	/// Asks the session to end at its next loop boundary.
	pub fn stop(&mut self) -> bool {
		self.animation.request_stop()
	}

	/// Cancels any armed timer and releases the animation's resources.
	pub fn teardown<D, S, T>(mut self, display: &mut D, store: &mut S, scheduler: &mut T)
	where
		D: Display + ?Sized,
		S: ResourceStore + ?Sized,
		T: Scheduler + ?Sized,
	{
		if let Some(timer) = self.timer.take() {
			scheduler.cancel_event(timer);
		}
		self.animation.deinit(display, store);
	}
}
