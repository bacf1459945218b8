//! Display surfaces.
//!
//! The engine never draws. It creates layers, attaches them to a parent, swaps the bitmaps
//! they show and asks for a redraw through [`Display::mark_dirty`]. Anything that can do
//! that implements [`Display`]; [`LayerTree`] is the in-process implementation used by the
//! demos and tests, and can flatten itself into a bitmap with [`LayerTree::compose`].

mod geometry;
mod tree;

pub use geometry::{Point, Rect, Size};
pub use tree::LayerTree;

use crate::resource::ResourceHandle;

/// Identifier of a layer owned by a [`Display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(usize);

impl LayerId {
	/// Wraps a raw layer index.
	pub fn from_raw(raw: usize) -> Self {
		Self(raw)
	}

	/// Returns the raw layer index.
	pub fn raw(self) -> usize {
		self.0
	}
}

/// How a layer's bitmap is combined with what is already drawn below it.
///
/// A pixel is "white" when its value is `>= 128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositingMode {
	/// Copy the source
	#[default]
	Assign,
	/// Copy the inverted source
	AssignInverted,
	/// White source pixels turn the destination white
	Or,
	/// Black source pixels turn the destination black
	And,
	/// White source pixels turn the destination black
	Clear,
	/// Black source pixels turn the destination white
	Set,
}

impl CompositingMode {
	/// Combines one source pixel with one destination pixel.
	///
	/// # Examples
	///
	/// ```
	/// use flipbook_types::surface::CompositingMode;
	///
	/// assert!(CompositingMode::Or.blend(true, false));
	/// assert!(!CompositingMode::Clear.blend(true, true));
	/// assert!(CompositingMode::Clear.blend(false, true));
	/// ```
	pub fn blend(self, src: bool, dst: bool) -> bool {
		match self {
			Self::Assign => src,
			Self::AssignInverted => !src,
			Self::Or => dst || src,
			Self::And => dst && src,
			Self::Clear => dst && !src,
			Self::Set => dst || !src,
		}
	}
}

/// A hierarchical display made of layers.
pub trait Display {
	/// Creates a detached, visible layer covering `frame` (relative to its future parent).
	fn create_layer(&mut self, frame: Rect) -> LayerId;

	/// Attaches `child` on top of `parent`'s existing children, detaching it from its
	/// previous parent.
	///
	/// Returns `false`, leaving the hierarchy untouched, if either layer does not exist or
	/// the attachment would make `child` an ancestor of itself.
	fn add_child(&mut self, parent: LayerId, child: LayerId) -> bool;

	/// Hides or shows a layer together with its children.
	fn set_hidden(&mut self, layer: LayerId, hidden: bool);

	/// Returns `true` if the layer is hidden.
	fn is_hidden(&self, layer: LayerId) -> bool;

	/// Sets the bitmap a layer draws, or clears it.
	fn set_bitmap(&mut self, layer: LayerId, bitmap: Option<ResourceHandle>);

	/// Sets how the layer's bitmap is combined with the content below.
	fn set_compositing_mode(&mut self, layer: LayerId, mode: CompositingMode);

	/// Requests a redraw of the layer on the next render pass.
	fn mark_dirty(&mut self, layer: LayerId);
}
