//! This crate provides the frame animation engine of the `flipbook-rs` project and the
//! contracts of the collaborators it drives.
//!
//! # Modules
//!
//! - **anim**: the [`Animation`](anim::Animation) state machine, linear and alternating playback
//! - **player**: binds an animation to a timer [`Scheduler`](timer::Scheduler)
//! - **resource**: numbered frame images, loaded and released through a
//!   [`ResourceStore`](resource::ResourceStore)
//! - **surface**: the layered [`Display`](surface::Display) frames are drawn into
//! - **timer**: one-shot timer events
//! - **config**: TOML and environment configuration
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```
//! use flipbook_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut display = LayerTree::new(Size::new(144, 168));
//! let mut store = MemoryStore::with_frames(1, (0..12).map(|_| ImageData::new(144, 100)));
//!
//! let root = display.root();
//! let mut anim = Animation::new(&mut display, &mut store, root, &AnimationConfig::new(1, 12))?;
//! anim.start()?;
//! let outcome = anim.tick(&mut display, &mut store, &PlaybackOptions::default())?;
//! assert_eq!(outcome.delay_ms(), Some(50));
//! # anim.deinit(&mut display, &mut store);
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```
//! use flipbook_types::anim::{PlaybackMode, PlaybackOptions};
//!
//! let options = PlaybackOptions::new(PlaybackMode::Alternating, 10, true);
//! assert_eq!(options.delay_ms().unwrap(), 100);
//! ```

pub mod anim;
pub mod config;
pub mod error;
pub mod player;
pub mod resource;
pub mod surface;
pub mod timer;

/// `use flipbook_types::prelude::*;` to import commonly used items.
pub mod prelude;
