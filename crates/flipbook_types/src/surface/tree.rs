//! Arena-backed layer hierarchy.

use log::warn;

use super::{CompositingMode, Display, LayerId, Point, Rect, Size};
use crate::resource::{ImageData, ResourceHandle, ResourceStore};

/// Pixel values at or above this threshold are treated as white.
pub const WHITE_THRESHOLD: u8 = 128;

#[derive(Debug, Clone)]
struct Layer {
	frame: Rect,
	hidden: bool,
	dirty: bool,
	bitmap: Option<ResourceHandle>,
	mode: CompositingMode,
	parent: Option<LayerId>,
	children: Vec<LayerId>,
}

impl Layer {
	fn new(frame: Rect) -> Self {
		Self {
			frame,
			hidden: false,
			dirty: false,
			bitmap: None,
			mode: CompositingMode::default(),
			parent: None,
			children: Vec::new(),
		}
	}
}

/// In-process [`Display`] holding every layer in a flat arena.
///
/// The tree starts with a root layer covering the whole screen. Layers are never freed;
/// a screen is expected to build its hierarchy once and keep it for its lifetime.
///
/// # Examples
///
/// ```
/// use flipbook_types::surface::{Display, LayerTree, Rect, Size};
///
/// let mut display = LayerTree::new(Size::new(144, 168));
/// let root = display.root();
/// let layer = display.create_layer(Rect::new(0, 0, 10, 10));
/// display.add_child(root, layer);
///
/// display.mark_dirty(root);
/// assert!(display.take_dirty(root));
/// assert!(!display.take_dirty(root));
/// ```
#[derive(Debug, Clone)]
pub struct LayerTree {
	layers: Vec<Layer>,
	root: LayerId,
}

impl LayerTree {
	/// Creates a tree whose root layer covers a screen of `size`.
	pub fn new(size: Size) -> Self {
		Self {
			layers: vec![Layer::new(Rect::at(Point::default(), size))],
			root: LayerId::from_raw(0),
		}
	}

	/// Returns the root layer.
	pub fn root(&self) -> LayerId {
		self.root
	}

	/// Returns the number of layers, root included.
	pub fn len(&self) -> usize {
		self.layers.len()
	}

	/// Always `false`: the root layer exists from construction.
	pub fn is_empty(&self) -> bool {
		self.layers.is_empty()
	}

	/// Returns the frame of a layer, relative to its parent.
	pub fn frame(&self, layer: LayerId) -> Option<Rect> {
		self.get(layer).map(|l| l.frame)
	}

	/// Returns the bitmap currently assigned to a layer.
	pub fn bitmap(&self, layer: LayerId) -> Option<ResourceHandle> {
		self.get(layer).and_then(|l| l.bitmap)
	}

	/// Returns the compositing mode of a layer.
	pub fn compositing_mode(&self, layer: LayerId) -> Option<CompositingMode> {
		self.get(layer).map(|l| l.mode)
	}

	/// Returns the parent of a layer, if attached.
	pub fn parent(&self, layer: LayerId) -> Option<LayerId> {
		self.get(layer).and_then(|l| l.parent)
	}

	/// Returns the children of a layer in drawing order.
	pub fn children(&self, layer: LayerId) -> &[LayerId] {
		self.get(layer).map_or(&[], |l| l.children.as_slice())
	}

	/// Returns `true` if a redraw was requested since the last [`take_dirty`](Self::take_dirty).
	pub fn is_dirty(&self, layer: LayerId) -> bool {
		self.get(layer).is_some_and(|l| l.dirty)
	}

	/// Returns and clears the redraw request of a layer.
	pub fn take_dirty(&mut self, layer: LayerId) -> bool {
		self.get_mut(layer).is_some_and(|l| std::mem::take(&mut l.dirty))
	}

	/// Flattens the visible part of the tree into a bitmap the size of the screen.
	///
	/// The background is black. Layers are drawn parent first, then children in the order
	/// they were attached, each with its own [`CompositingMode`]. Hidden layers are skipped
	/// together with their children; bitmaps are clipped to the layer frame and the screen.
	pub fn compose<S: ResourceStore + ?Sized>(&self, store: &S) -> ImageData {
		let size = self.layers[self.root.raw()].frame.size;
		let mut canvas = ImageData::new(size.w, size.h);
		self.draw(self.root, Point::default(), store, &mut canvas);
		canvas
	}

	fn draw<S: ResourceStore + ?Sized>(
		&self,
		id: LayerId,
		parent_origin: Point,
		store: &S,
		canvas: &mut ImageData,
	) {
		let Some(layer) = self.get(id) else {
			return;
		};
		if layer.hidden {
			return;
		}

		let origin =
			Point::new(parent_origin.x + layer.frame.origin.x, parent_origin.y + layer.frame.origin.y);

		if let Some(bitmap) = layer.bitmap.and_then(|handle| store.image(handle)) {
			let width = bitmap.width().min(layer.frame.size.w);
			let height = bitmap.height().min(layer.frame.size.h);
			for y in 0..height {
				for x in 0..width {
					let (Ok(cx), Ok(cy)) = (
						u32::try_from(i64::from(origin.x) + i64::from(x)),
						u32::try_from(i64::from(origin.y) + i64::from(y)),
					) else {
						continue;
					};
					if cx >= canvas.width() || cy >= canvas.height() {
						continue;
					}

					let src = bitmap.get_pixel(x, y).0[0] >= WHITE_THRESHOLD;
					let pixel = canvas.get_pixel_mut(cx, cy);
					let dst = pixel.0[0] >= WHITE_THRESHOLD;
					pixel.0[0] = if layer.mode.blend(src, dst) { 255 } else { 0 };
				}
			}
		}

		for child in &layer.children {
			self.draw(*child, origin, store, canvas);
		}
	}

	// a layer counts as its own ancestor
	fn is_ancestor(&self, ancestor: LayerId, layer: LayerId) -> bool {
		let mut current = Some(layer);
		while let Some(id) = current {
			if id == ancestor {
				return true;
			}
			current = self.get(id).and_then(|l| l.parent);
		}
		false
	}

	fn get(&self, layer: LayerId) -> Option<&Layer> {
		self.layers.get(layer.raw())
	}

	fn get_mut(&mut self, layer: LayerId) -> Option<&mut Layer> {
		let found = self.layers.get_mut(layer.raw());
		if found.is_none() {
			warn!("Unknown layer {}", layer.raw());
		}
		found
	}
}

impl Display for LayerTree {
	fn create_layer(&mut self, frame: Rect) -> LayerId {
		self.layers.push(Layer::new(frame));
		LayerId::from_raw(self.layers.len() - 1)
	}

	fn add_child(&mut self, parent: LayerId, child: LayerId) -> bool {
		if self.get(parent).is_none() || self.get(child).is_none() || self.is_ancestor(child, parent)
		{
			warn!("Refusing to attach layer {} to {}", child.raw(), parent.raw());
			return false;
		}

		if let Some(old_parent) = self.layers[child.raw()].parent {
			self.layers[old_parent.raw()].children.retain(|c| *c != child);
		}
		self.layers[child.raw()].parent = Some(parent);
		self.layers[parent.raw()].children.push(child);
		true
	}

	fn set_hidden(&mut self, layer: LayerId, hidden: bool) {
		if let Some(l) = self.get_mut(layer) {
			l.hidden = hidden;
		}
	}

	fn is_hidden(&self, layer: LayerId) -> bool {
		self.get(layer).is_some_and(|l| l.hidden)
	}

	fn set_bitmap(&mut self, layer: LayerId, bitmap: Option<ResourceHandle>) {
		if let Some(l) = self.get_mut(layer) {
			l.bitmap = bitmap;
		}
	}

	fn set_compositing_mode(&mut self, layer: LayerId, mode: CompositingMode) {
		if let Some(l) = self.get_mut(layer) {
			l.mode = mode;
		}
	}

	fn mark_dirty(&mut self, layer: LayerId) {
		if let Some(l) = self.get_mut(layer) {
			l.dirty = true;
		}
	}
}
