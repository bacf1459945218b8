//! Frame image resources.
//!
//! Frames are addressed by numeric [`ResourceId`]s laid out contiguously: frame `n` of an
//! opaque animation lives at `first + n`, while a transparent animation stores an
//! image/mask pair per frame at `first + 2n` and `first + 2n + 1`.
//!
//! A [`ResourceStore`] hands out a [`ResourceHandle`] for every successful load. Handles are
//! the only way to reach the decoded [`ImageData`] and must be given back through
//! [`ResourceStore::release`] once the frame is no longer displayed.
//!
//! # Examples
//!
//! ```
//! use flipbook_types::resource::{ImageData, MemoryStore, ResourceStore};
//!
//! let mut store = MemoryStore::new();
//! store.insert(7, ImageData::new(4, 4));
//!
//! let handle = store.load(7).unwrap();
//! assert_eq!(store.image(handle).map(|img| img.width()), Some(4));
//! assert_eq!(store.outstanding(), 1);
//!
//! store.release(handle);
//! assert_eq!(store.outstanding(), 0);
//! ```

use std::fmt;

use crate::error::ResourceError;

mod directory;
mod memory;

pub use directory::DirectoryStore;
pub use memory::MemoryStore;

/// Identifier of a frame image in the resource numbering space.
pub type ResourceId = u32;

/// Decoded frame bitmap (8-bit grayscale, values `>= 128` are "white").
pub type ImageData = image::GrayImage;

/// Token for one outstanding resource load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceHandle(u64);

impl ResourceHandle {
	/// Wraps a raw handle value. Stores use this to mint handles.
	pub fn from_raw(raw: u64) -> Self {
		Self(raw)
	}

	/// Returns the raw handle value.
	pub fn raw(self) -> u64 {
		self.0
	}
}

impl fmt::Display for ResourceHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Source of frame images.
pub trait ResourceStore {
	/// Loads the image registered under `id`.
	///
	/// # Errors
	///
	/// Returns an error if the image does not exist or cannot be decoded.
	fn load(&mut self, id: ResourceId) -> Result<ResourceHandle, ResourceError>;

	/// Releases a handle obtained from [`load`](Self::load).
	///
	/// Releasing an unknown or already released handle is a no-op.
	fn release(&mut self, handle: ResourceHandle);

	/// Returns the decoded image behind a live handle.
	fn image(&self, handle: ResourceHandle) -> Option<&ImageData>;

	/// Returns the number of handles currently held by callers.
	fn outstanding(&self) -> usize;

	/// Loads an image together with its mask.
	///
	/// Either both handles are returned or none is held: when the mask fails to load the
	/// already loaded image is released before the error is returned.
	///
	/// # Errors
	///
	/// Returns the first load error encountered.
	fn load_pair(
		&mut self,
		image_id: ResourceId,
		mask_id: ResourceId,
	) -> Result<(ResourceHandle, ResourceHandle), ResourceError> {
		let image = self.load(image_id)?;
		match self.load(mask_id) {
			Ok(mask) => Ok((image, mask)),
			Err(e) => {
				self.release(image);
				Err(e)
			}
		}
	}
}
