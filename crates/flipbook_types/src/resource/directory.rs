//! Resource store reading frame images from a directory.

use std::{
	collections::HashMap,
	io,
	path::{Path, PathBuf},
};

use log::{debug, warn};

use super::{ImageData, ResourceHandle, ResourceId, ResourceStore};
use crate::error::ResourceError;

/// Resource store that decodes `<root>/<prefix><id>.<extension>` on every load.
///
/// Any format supported by the `image` crate can be used; frames are converted to 8-bit
/// grayscale on load. Only loaded frames are kept in memory, so an animation that releases
/// its previous frame before loading the next one holds a single decoded frame at a time.
///
/// # Examples
///
/// ```no_run
/// use flipbook_types::resource::{DirectoryStore, ResourceStore};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Reads assets/frame_1.png
/// let mut store = DirectoryStore::new("assets", "frame_", "png");
/// let handle = store.load(1)?;
/// println!("{:?}", store.image(handle).map(|img| img.dimensions()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DirectoryStore {
	root: PathBuf,
	prefix: String,
	extension: String,
	loaded: HashMap<ResourceHandle, (ResourceId, ImageData)>,
	next_handle: u64,
}

impl DirectoryStore {
	/// Creates a store for files named `<prefix><id>.<extension>` under `root`.
	pub fn new(
		root: impl Into<PathBuf>,
		prefix: impl Into<String>,
		extension: impl Into<String>,
	) -> Self {
		Self {
			root: root.into(),
			prefix: prefix.into(),
			extension: extension.into(),
			loaded: HashMap::new(),
			next_handle: 0,
		}
	}

	/// Returns the directory frames are read from.
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Returns the path a resource id maps to.
	pub fn path_for(&self, id: ResourceId) -> PathBuf {
		self.root.join(format!("{}{}.{}", self.prefix, id, self.extension))
	}
}

impl ResourceStore for DirectoryStore {
	fn load(&mut self, id: ResourceId) -> Result<ResourceHandle, ResourceError> {
		let path = self.path_for(id);
		let bytes = match std::fs::read(&path) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				return Err(ResourceError::NotFound {
					id,
				});
			}
			Err(e) => return Err(e.into()),
		};

		let image = image::load_from_memory(&bytes)
			.map_err(|source| ResourceError::Decode {
				id,
				source,
			})?
			.to_luma8();
		debug!("Loaded {} ({}x{})", path.display(), image.width(), image.height());

		let handle = ResourceHandle::from_raw(self.next_handle);
		self.next_handle += 1;
		self.loaded.insert(handle, (id, image));
		Ok(handle)
	}

	fn release(&mut self, handle: ResourceHandle) {
		if self.loaded.remove(&handle).is_none() {
			warn!("Released unknown resource handle {handle}");
		}
	}

	fn image(&self, handle: ResourceHandle) -> Option<&ImageData> {
		self.loaded.get(&handle).map(|(_, image)| image)
	}

	fn outstanding(&self) -> usize {
		self.loaded.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scratch_dir(name: &str) -> PathBuf {
		let dir = std::env::temp_dir().join(format!("flipbook-{}-{}", name, std::process::id()));
		std::fs::create_dir_all(&dir).unwrap();
		dir
	}

	#[test]
	fn test_path_for() {
		let store = DirectoryStore::new("frames", "nyan_", "png");
		assert_eq!(store.path_for(12), Path::new("frames").join("nyan_12.png"));
	}

	#[test]
	fn test_missing_file() {
		let dir = scratch_dir("missing");
		let mut store = DirectoryStore::new(&dir, "f", "png");
		assert!(matches!(
			store.load(1),
			Err(ResourceError::NotFound {
				id: 1
			})
		));
	}

	#[test]
	fn test_load_png_and_release() {
		let dir = scratch_dir("load");
		let frame = ImageData::from_fn(3, 2, |x, _| image::Luma([if x == 0 { 255 } else { 0 }]));
		frame.save(dir.join("f4.png")).unwrap();

		let mut store = DirectoryStore::new(&dir, "f", "png");
		let handle = store.load(4).unwrap();
		let loaded = store.image(handle).unwrap();
		assert_eq!(loaded.dimensions(), (3, 2));
		assert_eq!(loaded.get_pixel(0, 0).0[0], 255);
		assert_eq!(store.outstanding(), 1);

		store.release(handle);
		assert_eq!(store.outstanding(), 0);
	}

	#[test]
	fn test_unreadable_file() {
		let dir = scratch_dir("unreadable");
		// a directory where the frame file should be
		std::fs::create_dir_all(dir.join("f5.png")).unwrap();

		let mut store = DirectoryStore::new(&dir, "f", "png");
		assert!(matches!(store.load(5), Err(ResourceError::IOError(_))));
		assert_eq!(store.outstanding(), 0);
	}

	#[test]
	fn test_undecodable_file() {
		let dir = scratch_dir("garbage");
		std::fs::write(dir.join("f9.png"), b"not a png").unwrap();

		let mut store = DirectoryStore::new(&dir, "f", "png");
		assert!(matches!(
			store.load(9),
			Err(ResourceError::Decode {
				id: 9,
				..
			})
		));
		assert_eq!(store.outstanding(), 0);
	}
}
