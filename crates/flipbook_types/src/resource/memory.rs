//! In-memory resource store.

use std::collections::HashMap;

use log::warn;

use super::{ImageData, ResourceHandle, ResourceId, ResourceStore};
use crate::error::ResourceError;

/// Resource store backed by images kept in memory.
///
/// Besides serving frames generated at runtime, the store keeps load statistics
/// ([`total_loads`](Self::total_loads), [`peak_outstanding`](Self::peak_outstanding)) which
/// makes it suitable for checking that an animation never holds more than one frame.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	images: HashMap<ResourceId, ImageData>,
	loaded: HashMap<ResourceHandle, ResourceId>,
	next_handle: u64,
	total_loads: usize,
	peak_outstanding: usize,
}

impl MemoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a store holding `frames` at consecutive ids starting at `first_id`.
	///
	/// # Examples
	///
	/// ```
	/// use flipbook_types::resource::{ImageData, MemoryStore};
	///
	/// let store = MemoryStore::with_frames(1, (0..3).map(|_| ImageData::new(8, 8)));
	/// assert!(store.contains(1));
	/// assert!(store.contains(3));
	/// assert!(!store.contains(4));
	/// ```
	pub fn with_frames(first_id: ResourceId, frames: impl IntoIterator<Item = ImageData>) -> Self {
		let mut store = Self::new();
		for (id, frame) in (first_id..).zip(frames) {
			store.insert(id, frame);
		}
		store
	}

	/// Registers (or replaces) the image stored under `id`.
	pub fn insert(&mut self, id: ResourceId, image: ImageData) {
		self.images.insert(id, image);
	}

	/// Removes the image stored under `id`. Live handles to it become dangling.
	pub fn remove(&mut self, id: ResourceId) -> Option<ImageData> {
		self.images.remove(&id)
	}

	/// Returns `true` if an image is registered under `id`.
	pub fn contains(&self, id: ResourceId) -> bool {
		self.images.contains_key(&id)
	}

	/// Returns the id a live handle was loaded from.
	pub fn resource_of(&self, handle: ResourceHandle) -> Option<ResourceId> {
		self.loaded.get(&handle).copied()
	}

	/// Returns the ids currently loaded, sorted.
	pub fn loaded_ids(&self) -> Vec<ResourceId> {
		let mut ids: Vec<_> = self.loaded.values().copied().collect();
		ids.sort_unstable();
		ids
	}

	/// Number of successful loads since creation.
	pub fn total_loads(&self) -> usize {
		self.total_loads
	}

	/// Highest number of handles ever held at the same time.
	pub fn peak_outstanding(&self) -> usize {
		self.peak_outstanding
	}
}

impl ResourceStore for MemoryStore {
	fn load(&mut self, id: ResourceId) -> Result<ResourceHandle, ResourceError> {
		if !self.images.contains_key(&id) {
			return Err(ResourceError::NotFound {
				id,
			});
		}

		let handle = ResourceHandle::from_raw(self.next_handle);
		self.next_handle += 1;
		self.loaded.insert(handle, id);
		self.total_loads += 1;
		self.peak_outstanding = self.peak_outstanding.max(self.loaded.len());
		Ok(handle)
	}

	fn release(&mut self, handle: ResourceHandle) {
		if self.loaded.remove(&handle).is_none() {
			warn!("Released unknown resource handle {handle}");
		}
	}

	fn image(&self, handle: ResourceHandle) -> Option<&ImageData> {
		self.loaded.get(&handle).and_then(|id| self.images.get(id))
	}

	fn outstanding(&self) -> usize {
		self.loaded.len()
	}
}
