//! This module is separated into its own crate to keep the facade thin, and should not be used directly.

/// `use flipbook_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export flipbook_types for convenience
pub use flipbook_types;

// Re-export commonly used types at crate root
pub use flipbook_types::{
	anim::{Animation, AnimationConfig, PlaybackMode, PlaybackOptions, TickOutcome},
	error::{AnimationError, ConfigError, ResourceError},
	player::Player,
};
