//! The frame animation state machine.

use log::{debug, info, warn};
use serde::Serialize;

use super::options::{AnimationConfig, PlaybackMode, PlaybackOptions, TickOutcome, frame_delay_ms};
use crate::{
	error::{AnimationError, ResourceError},
	resource::{ResourceHandle, ResourceId, ResourceStore},
	surface::{CompositingMode, Display, LayerId, Point, Rect, Size},
};

/// Handles of the frame currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadedFrame {
	Single(ResourceHandle),
	Pair {
		image: ResourceHandle,
		mask: ResourceHandle,
	},
}

impl LoadedFrame {
	fn image(self) -> ResourceHandle {
		match self {
			Self::Single(image)
			| Self::Pair {
				image,
				..
			} => image,
		}
	}

	fn mask(self) -> Option<ResourceHandle> {
		match self {
			Self::Single(_) => None,
			Self::Pair {
				mask,
				..
			} => Some(mask),
		}
	}

	fn release<S: ResourceStore + ?Sized>(self, store: &mut S) {
		store.release(self.image());
		if let Some(mask) = self.mask() {
			store.release(mask);
		}
	}
}

/// Serializable view of an animation's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimationState {
	/// Resource id of frame 0
	pub first_resource_id: ResourceId,
	/// Resource position of the next frame to show
	pub resource_cursor: i64,
	/// Position along the current pass
	pub frame_index: u32,
	/// Number of distinct frames
	pub num_frames: u32,
	/// Image/mask pair mode
	pub transparent: bool,
	/// Hidden while not playing
	pub hidden_at_rest: bool,
	/// A play session is active
	pub playing: bool,
	/// The session ends at the next loop boundary
	pub stop_requested: bool,
}

/// A frame-by-frame bitmap animation living in a layer of a [`Display`].
///
/// The animation owns a container layer attached to a destination layer, one bitmap layer
/// per image (two in transparent mode) and the resource handles of the frame on screen.
/// It does not own a timer: a play session is a sequence of calls to [`tick`](Self::tick)
/// (or [`tick_linear`](Self::tick_linear) / [`tick_alternating`](Self::tick_alternating))
/// made by the caller, each returning the delay before the next call.
///
/// # Frame addressing
///
/// Frame `n` is resource `first + n` for opaque animations. Transparent animations use two
/// consecutive resources per frame: the image at `first + 2n`, drawn with
/// [`CompositingMode::Or`], and its mask at `first + 2n + 1`, drawn with
/// [`CompositingMode::Clear`].
///
/// Non-continuous passes reach one position outside the frame range (one past the last
/// frame in linear mode, one before the first in alternating mode). Nothing is loaded for
/// it; the tick that lands there clears the layer and ends the pass.
///
/// # Examples
///
/// ```
/// use flipbook_types::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut display = LayerTree::new(Size::new(144, 168));
/// let mut store = MemoryStore::with_frames(1, (0..3).map(|_| ImageData::new(16, 16)));
///
/// let root = display.root();
/// let mut anim = Animation::new(&mut display, &mut store, root, &AnimationConfig::new(1, 3))?;
/// anim.start()?;
///
/// let mut ticks = 1;
/// while anim.tick_linear(&mut display, &mut store, 20, false)? != TickOutcome::Stopped {
/// 	ticks += 1;
/// }
/// assert_eq!(ticks, 4);
/// assert!(!anim.is_playing());
///
/// anim.deinit(&mut display, &mut store);
/// assert_eq!(store.outstanding(), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Animation {
	layer: LayerId,
	image_layer: LayerId,
	mask_layer: Option<LayerId>,
	destination: LayerId,
	loaded: Option<LoadedFrame>,

	first_resource_id: ResourceId,
	resource_cursor: i64,
	frame_index: u32,
	num_frames: u32,

	transparent: bool,
	hidden_at_rest: bool,
	playing: bool,
	stop_requested: bool,
}

impl Animation {
	/// Creates an animation showing frame 0 and attaches it to `destination`.
	///
	/// The container layer is sized after the first frame's image and placed at
	/// `config.position`. It starts hidden when `config.hidden_at_rest` is set.
	///
	/// # Errors
	///
	/// Returns [`AnimationError::InvalidFrameCount`] for an empty animation,
	/// [`AnimationError::ResourceLoad`] if frame 0 (or its mask) cannot be loaded and
	/// [`AnimationError::InvalidDestination`] if `destination` is not a layer of `display`.
	/// Nothing is attached to the display and no handle is held on error.
	pub fn new<D, S>(
		display: &mut D,
		store: &mut S,
		destination: LayerId,
		config: &AnimationConfig,
	) -> Result<Self, AnimationError>
	where
		D: Display + ?Sized,
		S: ResourceStore + ?Sized,
	{
		config.validate()?;

		let mut anim = Self {
			layer: destination,
			image_layer: destination,
			mask_layer: None,
			destination,
			loaded: None,
			first_resource_id: config.first_resource_id,
			resource_cursor: i64::from(config.first_resource_id),
			frame_index: 0,
			num_frames: config.num_frames,
			transparent: config.transparent,
			hidden_at_rest: config.hidden_at_rest,
			playing: false,
			stop_requested: false,
		};

		let loaded = anim.load_current(store)?.ok_or(ResourceError::NotFound {
			id: config.first_resource_id,
		})?;
		let Some(size) = store.image(loaded.image()).map(|img| Size::new(img.width(), img.height()))
		else {
			loaded.release(store);
			return Err(ResourceError::NotFound {
				id: config.first_resource_id,
			}
			.into());
		};

		anim.layer = display.create_layer(Rect::at(config.position, size));
		anim.image_layer = display.create_layer(Rect::at(Point::default(), size));
		display.add_child(anim.layer, anim.image_layer);
		if anim.transparent {
			let mask_layer = display.create_layer(Rect::at(Point::default(), size));
			display.set_compositing_mode(anim.image_layer, CompositingMode::Or);
			display.set_compositing_mode(mask_layer, CompositingMode::Clear);
			display.add_child(anim.layer, mask_layer);
			anim.mask_layer = Some(mask_layer);
		}
		anim.attach(display, loaded);

		if !display.add_child(destination, anim.layer) {
			anim.release_frame(display, store);
			return Err(AnimationError::InvalidDestination(destination));
		}
		if anim.hidden_at_rest {
			display.set_hidden(anim.layer, true);
		}

		info!(
			"Initialized animation: {} frame(s) from resource {}, {}x{}{}",
			anim.num_frames,
			anim.first_resource_id,
			size.w,
			size.h,
			if anim.transparent { ", transparent" } else { "" }
		);
		Ok(anim)
	}

	/// Returns the container layer, for composition by the caller.
	pub fn layer(&self) -> LayerId {
		self.layer
	}

	/// Returns the layer the animation is attached to and redraws.
	pub fn destination(&self) -> LayerId {
		self.destination
	}

	/// Returns `true` while a play session is active.
	pub fn is_playing(&self) -> bool {
		self.playing
	}

	/// Returns `true` if the active session ends at the next loop boundary.
	pub fn is_stop_requested(&self) -> bool {
		self.stop_requested
	}

	/// Position along the current pass. Zero at rest.
	pub fn frame_index(&self) -> u32 {
		self.frame_index
	}

	/// Resource position of the next frame to show.
	///
	/// This is signed because a non-continuous alternating pass moves one step before
	/// `first_resource_id` right before it ends.
	pub fn resource_cursor(&self) -> i64 {
		self.resource_cursor
	}

	/// Resource id of frame 0.
	pub fn first_resource_id(&self) -> ResourceId {
		self.first_resource_id
	}

	/// Number of distinct frames.
	pub fn num_frames(&self) -> u32 {
		self.num_frames
	}

	/// Returns `true` for image/mask pair animations.
	pub fn is_transparent(&self) -> bool {
		self.transparent
	}

	/// Returns `true` if the animation hides while not playing.
	pub fn is_hidden_at_rest(&self) -> bool {
		self.hidden_at_rest
	}

	/// Distance between the resources of two consecutive frames.
	pub fn step(&self) -> u32 {
		if self.transparent { 2 } else { 1 }
	}

	/// Handles of the frame on screen: the image and, in transparent mode, its mask.
	pub fn loaded_handles(&self) -> Option<(ResourceHandle, Option<ResourceHandle>)> {
		self.loaded.map(|frame| (frame.image(), frame.mask()))
	}

	/// Returns a serializable copy of the animation state.
	pub fn snapshot(&self) -> AnimationState {
		AnimationState {
			first_resource_id: self.first_resource_id,
			resource_cursor: self.resource_cursor,
			frame_index: self.frame_index,
			num_frames: self.num_frames,
			transparent: self.transparent,
			hidden_at_rest: self.hidden_at_rest,
			playing: self.playing,
			stop_requested: self.stop_requested,
		}
	}

	/// Begins a play session. The caller then arms its timer and ticks.
	///
	/// # Errors
	///
	/// Returns [`AnimationError::AlreadyPlaying`] if a session is active.
	pub fn start(&mut self) -> Result<(), AnimationError> {
		if self.playing {
			return Err(AnimationError::AlreadyPlaying);
		}
		self.playing = true;
		info!("Animation at resource {} started", self.first_resource_id);
		Ok(())
	}

	/// Asks the active session to end at its next loop boundary.
	///
	/// The current pass always completes. Returns `false`, and does nothing, when no session
	/// is active.
	pub fn request_stop(&mut self) -> bool {
		if !self.playing {
			debug!("Stop requested on an idle animation, ignoring");
			return false;
		}
		self.stop_requested = true;
		true
	}

	/// Shows the frame at the resource cursor.
	///
	/// Unhides the container layer, releases the frame on screen, loads the one at the
	/// cursor and marks the destination layer dirty. At a position outside the frame range
	/// the layer is left without bitmap.
	///
	/// # Errors
	///
	/// Returns [`AnimationError::ResourceLoad`] if the frame cannot be loaded. The layer is
	/// then left empty rather than showing the previous frame.
	pub fn show_current_frame<D, S>(
		&mut self,
		display: &mut D,
		store: &mut S,
	) -> Result<(), AnimationError>
	where
		D: Display + ?Sized,
		S: ResourceStore + ?Sized,
	{
		display.set_hidden(self.layer, false);
		self.release_frame(display, store);

		match self.load_current(store)? {
			Some(frame) => {
				self.attach(display, frame);
				debug!("Frame {} -> resource {}", self.frame_index, self.resource_cursor);
			}
			None => debug!("Frame {} is past the sequence, showing nothing", self.frame_index),
		}

		display.mark_dirty(self.destination);
		Ok(())
	}

	/// Advances a linear session by one frame.
	///
	/// Shows the current frame, then moves forward. After the last frame the animation goes
	/// back to frame 0 and either loops (when `continuous` and no stop was requested) or ends
	/// the session, returning [`TickOutcome::Stopped`]. Continuous playback wraps right after
	/// the last frame; otherwise one more tick is spent past the end before stopping.
	///
	/// # Errors
	///
	/// Returns [`AnimationError::InvalidFps`] for an out of range rate,
	/// [`AnimationError::NotPlaying`] outside of a session and
	/// [`AnimationError::ResourceLoad`] on a failed load, which also ends the session.
	pub fn tick_linear<D, S>(
		&mut self,
		display: &mut D,
		store: &mut S,
		fps: u32,
		continuous: bool,
	) -> Result<TickOutcome, AnimationError>
	where
		D: Display + ?Sized,
		S: ResourceStore + ?Sized,
	{
		let delay_ms = frame_delay_ms(fps)?;
		self.ensure_playing()?;

		let result = self.linear_step(display, store, continuous, delay_ms);
		self.end_session_on_error(result)
	}

	/// Advances an alternating session by one frame.
	///
	/// Frames play forward up to the last one, then backward. The turnaround frame is shown
	/// once. In continuous mode the pass ends one step early so that frame 0 is not repeated
	/// when the loop starts over; otherwise the pass walks one step before frame 0 and then
	/// ends the session.
	///
	/// # Errors
	///
	/// Same as [`tick_linear`](Self::tick_linear).
	pub fn tick_alternating<D, S>(
		&mut self,
		display: &mut D,
		store: &mut S,
		fps: u32,
		continuous: bool,
	) -> Result<TickOutcome, AnimationError>
	where
		D: Display + ?Sized,
		S: ResourceStore + ?Sized,
	{
		let delay_ms = frame_delay_ms(fps)?;
		self.ensure_playing()?;

		let result = self.alternating_step(display, store, continuous, delay_ms);
		self.end_session_on_error(result)
	}

	/// Advances the session using `options`.
	///
	/// # Errors
	///
	/// Same as [`tick_linear`](Self::tick_linear).
	pub fn tick<D, S>(
		&mut self,
		display: &mut D,
		store: &mut S,
		options: &PlaybackOptions,
	) -> Result<TickOutcome, AnimationError>
	where
		D: Display + ?Sized,
		S: ResourceStore + ?Sized,
	{
		match options.mode {
			PlaybackMode::Linear => self.tick_linear(display, store, options.fps, options.continuous),
			PlaybackMode::Alternating => {
				self.tick_alternating(display, store, options.fps, options.continuous)
			}
		}
	}

	/// Releases the frame on screen.
	///
	/// The caller must have cancelled its timer; the layers stay attached to the display.
	pub fn deinit<D, S>(mut self, display: &mut D, store: &mut S)
	where
		D: Display + ?Sized,
		S: ResourceStore + ?Sized,
	{
		if self.playing {
			warn!("Deinitializing animation at resource {} while playing", self.first_resource_id);
		}
		self.release_frame(display, store);
		self.playing = false;
		self.stop_requested = false;
	}

	fn linear_step<D, S>(
		&mut self,
		display: &mut D,
		store: &mut S,
		continuous: bool,
		delay_ms: u32,
	) -> Result<TickOutcome, AnimationError>
	where
		D: Display + ?Sized,
		S: ResourceStore + ?Sized,
	{
		let last_index = if continuous { self.num_frames - 1 } else { self.num_frames };

		self.show_current_frame(display, store)?;
		if self.frame_index < last_index {
			self.step_forward();
			Ok(TickOutcome::Continue {
				delay_ms,
			})
		} else {
			self.complete_pass(display, store, continuous, delay_ms)
		}
	}

	fn alternating_step<D, S>(
		&mut self,
		display: &mut D,
		store: &mut S,
		continuous: bool,
		delay_ms: u32,
	) -> Result<TickOutcome, AnimationError>
	where
		D: Display + ?Sized,
		S: ResourceStore + ?Sized,
	{
		// derived from `continuous` on every call, never stored
		let extra: i64 = if continuous { -1 } else { 1 };
		let bound = i64::from(self.num_frames) - 1;

		self.show_current_frame(display, store)?;
		let index = i64::from(self.frame_index);
		if index < bound {
			self.step_forward();
		} else if index < 2 * bound + extra {
			self.step_backward();
		} else {
			return self.complete_pass(display, store, continuous, delay_ms);
		}
		Ok(TickOutcome::Continue {
			delay_ms,
		})
	}

	fn ensure_playing(&self) -> Result<(), AnimationError> {
		if self.playing { Ok(()) } else { Err(AnimationError::NotPlaying) }
	}

	fn step_forward(&mut self) {
		self.resource_cursor += i64::from(self.step());
		self.frame_index += 1;
	}

	// the index keeps counting along the pass while the cursor walks back
	fn step_backward(&mut self) {
		self.resource_cursor -= i64::from(self.step());
		self.frame_index += 1;
	}

	fn rewind(&mut self) {
		self.resource_cursor = i64::from(self.first_resource_id);
		self.frame_index = 0;
	}

	fn complete_pass<D, S>(
		&mut self,
		display: &mut D,
		store: &mut S,
		continuous: bool,
		delay_ms: u32,
	) -> Result<TickOutcome, AnimationError>
	where
		D: Display + ?Sized,
		S: ResourceStore + ?Sized,
	{
		self.rewind();
		if continuous && !self.stop_requested {
			return Ok(TickOutcome::Continue {
				delay_ms,
			});
		}

		self.playing = false;
		self.stop_requested = false;
		if self.hidden_at_rest {
			display.set_hidden(self.layer, true);
			display.mark_dirty(self.destination);
		} else {
			self.show_current_frame(display, store)?;
		}
		info!("Animation at resource {} stopped", self.first_resource_id);
		Ok(TickOutcome::Stopped)
	}

	fn end_session_on_error(
		&mut self,
		result: Result<TickOutcome, AnimationError>,
	) -> Result<TickOutcome, AnimationError> {
		if let Err(e) = &result {
			warn!("Animation at resource {} aborted: {}", self.first_resource_id, e);
			self.rewind();
			self.playing = false;
			self.stop_requested = false;
		}
		result
	}

	/// Resource ids of the frame at the cursor, if the cursor addresses one.
	fn current_ids(&self) -> Option<(ResourceId, Option<ResourceId>)> {
		let offset = self.resource_cursor - i64::from(self.first_resource_id);
		let step = i64::from(self.step());
		if offset < 0 || offset % step != 0 || offset / step >= i64::from(self.num_frames) {
			return None;
		}

		let image = ResourceId::try_from(self.resource_cursor).ok()?;
		if self.transparent {
			Some((image, Some(image.checked_add(1)?)))
		} else {
			Some((image, None))
		}
	}

	fn load_current<S: ResourceStore + ?Sized>(
		&self,
		store: &mut S,
	) -> Result<Option<LoadedFrame>, ResourceError> {
		let Some((image_id, mask_id)) = self.current_ids() else {
			return Ok(None);
		};

		let frame = match mask_id {
			Some(mask_id) => {
				let (image, mask) = store.load_pair(image_id, mask_id)?;
				LoadedFrame::Pair {
					image,
					mask,
				}
			}
			None => LoadedFrame::Single(store.load(image_id)?),
		};
		Ok(Some(frame))
	}

	fn attach<D: Display + ?Sized>(&mut self, display: &mut D, frame: LoadedFrame) {
		display.set_bitmap(self.image_layer, Some(frame.image()));
		if let Some(mask_layer) = self.mask_layer {
			display.set_bitmap(mask_layer, frame.mask());
		}
		self.loaded = Some(frame);
	}

	fn release_frame<D, S>(&mut self, display: &mut D, store: &mut S)
	where
		D: Display + ?Sized,
		S: ResourceStore + ?Sized,
	{
		if let Some(frame) = self.loaded.take() {
			display.set_bitmap(self.image_layer, None);
			if let Some(mask_layer) = self.mask_layer {
				display.set_bitmap(mask_layer, None);
			}
			frame.release(store);
		}
	}
}

impl Drop for Animation {
	fn drop(&mut self) {
		if let Some(frame) = self.loaded {
			warn!(
				"Animation at resource {} dropped without deinit, leaking handle {}",
				self.first_resource_id,
				frame.image()
			);
		}
	}
}
