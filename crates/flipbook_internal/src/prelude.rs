//! Prelude module for `flipbook_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use flipbook_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let mut store = MemoryStore::new();
//! store.insert(1, ImageData::new(8, 8));
//! let options = PlaybackOptions::new(PlaybackMode::Linear, 20, true);
//! assert_eq!(options.delay_ms().unwrap(), 50);
//! ```

// Re-export everything from flipbook_types::prelude
#[doc(inline)]
pub use flipbook_types::prelude::*;

// Re-export the entire flipbook_types module for advanced usage
#[doc(inline)]
pub use flipbook_types;
