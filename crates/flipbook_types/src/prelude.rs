//! Prelude module for `flipbook_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```
//! use flipbook_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let display = LayerTree::new(Size::new(144, 168));
//! let config = AnimationConfig::new(1, 12).at(Point::new(0, 40));
//! let timers = ManualScheduler::new();
//! ```

// Engine
#[doc(inline)]
pub use crate::anim::{
	Animation, AnimationConfig, AnimationState, MAX_FPS, PlaybackMode, PlaybackOptions,
	TickOutcome, frame_delay_ms,
};

// Configuration
#[doc(inline)]
pub use crate::config::{FlipbookConfig, FramesSource};

// Errors
#[doc(inline)]
pub use crate::error::{AnimationError, ConfigError, ResourceError};

// Playback driver
#[doc(inline)]
pub use crate::player::Player;

// Resources
#[doc(inline)]
pub use crate::resource::{
	DirectoryStore, ImageData, MemoryStore, ResourceHandle, ResourceId, ResourceStore,
};

// Display surface
#[doc(inline)]
pub use crate::surface::{CompositingMode, Display, LayerId, LayerTree, Point, Rect, Size};

// Timers
#[doc(inline)]
pub use crate::timer::{Cookie, ManualScheduler, Scheduler, TimerHandle};
