//! Animation and playback parameters.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::AnimationError, resource::ResourceId, surface::Point};

/// Highest accepted frame rate; anything faster would need a sub-millisecond delay.
pub const MAX_FPS: u32 = 1000;

/// Converts a frame rate into the delay between two ticks.
///
/// # Errors
///
/// Returns [`AnimationError::InvalidFps`] unless `1 <= fps <= MAX_FPS`.
///
/// # Examples
///
/// ```
/// use flipbook_types::anim::frame_delay_ms;
///
/// assert_eq!(frame_delay_ms(20).unwrap(), 50);
/// assert_eq!(frame_delay_ms(3).unwrap(), 333);
/// assert!(frame_delay_ms(0).is_err());
/// ```
pub fn frame_delay_ms(fps: u32) -> Result<u32, AnimationError> {
	if fps == 0 || fps > MAX_FPS {
		return Err(AnimationError::InvalidFps(fps));
	}
	Ok(1000 / fps)
}

/// Static description of an animation, fixed at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
	/// Resource id of frame 0 (of its image, in transparent mode)
	pub first_resource_id: ResourceId,
	/// Number of distinct frames
	pub num_frames: u32,
	/// Each frame is an image/mask pair occupying two consecutive ids
	#[serde(default)]
	pub transparent: bool,
	/// Hide the animation while it is not playing
	#[serde(default)]
	pub hidden_at_rest: bool,
	/// Position of the animation inside its destination layer
	#[serde(default)]
	pub position: Point,
}

impl AnimationConfig {
	/// Creates an opaque, visible animation at the origin.
	pub fn new(first_resource_id: ResourceId, num_frames: u32) -> Self {
		Self {
			first_resource_id,
			num_frames,
			transparent: false,
			hidden_at_rest: false,
			position: Point::default(),
		}
	}

	/// Sets the image/mask pair mode.
	pub fn transparent(mut self, transparent: bool) -> Self {
		self.transparent = transparent;
		self
	}

	/// Sets the visibility policy at rest.
	pub fn hidden_at_rest(mut self, hidden: bool) -> Self {
		self.hidden_at_rest = hidden;
		self
	}

	/// Sets the position inside the destination layer.
	pub fn at(mut self, position: Point) -> Self {
		self.position = position;
		self
	}

	/// Checks the parameters.
	///
	/// # Errors
	///
	/// Returns [`AnimationError::InvalidFrameCount`] when `num_frames` is zero.
	pub fn validate(&self) -> Result<(), AnimationError> {
		if self.num_frames == 0 {
			return Err(AnimationError::InvalidFrameCount(self.num_frames));
		}
		Ok(())
	}
}

/// Order in which frames are played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
	/// First frame to last frame
	#[default]
	Linear,
	/// First frame to last frame and back again
	Alternating,
}

impl fmt::Display for PlaybackMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Linear => write!(f, "linear"),
			Self::Alternating => write!(f, "alternating"),
		}
	}
}

impl FromStr for PlaybackMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"linear" => Ok(Self::Linear),
			"alternating" | "pingpong" | "ping-pong" => Ok(Self::Alternating),
			other => Err(format!("unknown playback mode '{other}' (expected linear or alternating)")),
		}
	}
}

/// Per-session playback parameters, passed on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackOptions {
	/// Frame order
	#[serde(default)]
	pub mode: PlaybackMode,
	/// Frames per second
	#[serde(default = "PlaybackOptions::default_fps")]
	pub fps: u32,
	/// Loop until a stop is requested
	#[serde(default)]
	pub continuous: bool,
}

impl PlaybackOptions {
	const fn default_fps() -> u32 {
		20
	}

	/// Creates options for the given mode and rate.
	pub fn new(mode: PlaybackMode, fps: u32, continuous: bool) -> Self {
		Self {
			mode,
			fps,
			continuous,
		}
	}

	/// Delay between two ticks at the configured rate.
	///
	/// # Errors
	///
	/// Returns [`AnimationError::InvalidFps`] for an out of range rate.
	pub fn delay_ms(&self) -> Result<u32, AnimationError> {
		frame_delay_ms(self.fps)
	}

	/// Checks the parameters.
	///
	/// # Errors
	///
	/// Returns [`AnimationError::InvalidFps`] for an out of range rate.
	pub fn validate(&self) -> Result<(), AnimationError> {
		self.delay_ms().map(|_| ())
	}
}

impl Default for PlaybackOptions {
	fn default() -> Self {
		Self::new(PlaybackMode::Linear, Self::default_fps(), false)
	}
}

/// What the driver of an animation must do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum TickOutcome {
	/// Tick again after `delay_ms` milliseconds
	Continue {
		/// Delay before the next tick
		delay_ms: u32,
	},
	/// The session ended; cancel the timer and stop ticking
	Stopped,
}

impl TickOutcome {
	/// Returns the requested delay, or `None` once stopped.
	pub fn delay_ms(self) -> Option<u32> {
		match self {
			Self::Continue {
				delay_ms,
			} => Some(delay_ms),
			Self::Stopped => None,
		}
	}

	/// Returns `true` if the session ended.
	pub fn is_stopped(self) -> bool {
		matches!(self, Self::Stopped)
	}
}
