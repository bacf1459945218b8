//! Screen geometry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
	/// Horizontal offset in pixels
	pub x: i32,
	/// Vertical offset in pixels
	pub y: i32,
}

impl Point {
	/// Creates a new point.
	pub const fn new(x: i32, y: i32) -> Self {
		Self {
			x,
			y,
		}
	}
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
	/// Width in pixels
	pub w: u32,
	/// Height in pixels
	pub h: u32,
}

impl Size {
	/// Creates a new size.
	pub const fn new(w: u32, h: u32) -> Self {
		Self {
			w,
			h,
		}
	}
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
	/// Top-left corner
	pub origin: Point,
	/// Extent
	pub size: Size,
}

impl Rect {
	/// Creates a rectangle from its corner and extent.
	pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
		Self {
			origin: Point::new(x, y),
			size: Size::new(w, h),
		}
	}

	/// Creates a rectangle at `origin` covering `size`.
	pub const fn at(origin: Point, size: Size) -> Self {
		Self {
			origin,
			size,
		}
	}
}

impl fmt::Display for Rect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}×{} at ({}, {})", self.size.w, self.size.h, self.origin.x, self.origin.y)
	}
}
