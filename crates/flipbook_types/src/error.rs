//! Error types for the animation engine and its collaborators.

use thiserror::Error;

use crate::resource::ResourceId;

/// Errors reported by a [`ResourceStore`](crate::resource::ResourceStore)
#[derive(Debug, Error)]
pub enum ResourceError {
	/// No image is registered under the requested identifier
	#[error("Resource {id} not found")]
	NotFound {
		/// Identifier that was requested
		id: ResourceId,
	},

	/// The image exists but could not be decoded
	#[error("Resource {id} could not be decoded: {source}")]
	Decode {
		/// Identifier that was requested
		id: ResourceId,
		/// Underlying decoder error
		source: image::ImageError,
	},

	/// The file exists but could not be read
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

/// Errors that can occur while initializing or driving an animation
#[derive(Debug, Error)]
pub enum AnimationError {
	/// A frame image (or its mask) could not be loaded
	#[error(transparent)]
	ResourceLoad(#[from] ResourceError),

	/// An animation needs at least one frame
	#[error("Invalid frame count {0}: an animation needs at least one frame")]
	InvalidFrameCount(u32),

	/// Frame rate outside of `1..=1000`
	#[error("Invalid frame rate {0} fps: expected a value between 1 and {max}", max = crate::anim::MAX_FPS)]
	InvalidFps(u32),

	/// A tick was delivered while no play session is active
	#[error("Animation is not playing")]
	NotPlaying,

	/// The layer the animation should attach to does not exist
	#[error("Destination layer {} does not exist", .0.raw())]
	InvalidDestination(crate::surface::LayerId),

	/// A play session was started while another one is still active
	#[error("Animation is already playing")]
	AlreadyPlaying,
}

impl AnimationError {
	/// Returns `true` for errors caused by bad parameters rather than missing content.
	pub fn is_configuration(&self) -> bool {
		matches!(
			self,
			Self::InvalidFrameCount(_) | Self::InvalidFps(_) | Self::InvalidDestination(_)
		)
	}
}

/// Errors that can occur while loading a [`FlipbookConfig`](crate::config::FlipbookConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The configuration sources could not be read or deserialized
	#[error(transparent)]
	Load(#[from] config::ConfigError),

	/// The configuration was read but describes an invalid animation
	#[error("Invalid configuration: {0}")]
	Invalid(#[from] AnimationError),

	/// Screen dimensions must be non-zero
	#[error("Invalid screen size {width}x{height}")]
	InvalidScreen {
		/// Configured width
		width: u32,
		/// Configured height
		height: u32,
	},
}
