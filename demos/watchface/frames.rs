//! Frame sources for the demo.

use anyhow::{Context, Result, bail};
use flipbook_rs::prelude::*;
use image::Luma;

/// Side of the square sprite drawn in generated frames
const SPRITE: u32 = 24;

pub fn open_store(config: &FlipbookConfig) -> Result<Box<dyn ResourceStore>> {
	match &config.frames {
		FramesSource::Directory {
			path,
			prefix,
			extension,
		} => {
			if !path.is_dir() {
				bail!("{} is not a directory", path.display());
			}
			let store = DirectoryStore::new(path.clone(), prefix.as_str(), extension.as_str());
			let first = store.path_for(config.animation.first_resource_id);
			log::info!("Reading frames starting at {}", first.display());
			Ok(Box::new(store))
		}
		FramesSource::Synthetic => Ok(Box::new(synthetic(config)?)),
	}
}

/// Generates a sprite sliding across the screen, plus a mask punching a hole in it when
/// the animation is transparent.
fn synthetic(config: &FlipbookConfig) -> Result<MemoryStore> {
	let width = config.screen.w;
	let height = (config.screen.h / 3).max(SPRITE);
	let num_frames = config.animation.num_frames;
	let travel = width.saturating_sub(SPRITE);

	let mut store = MemoryStore::new();
	let mut id = config.animation.first_resource_id;
	for frame in 0..num_frames {
		let x = if num_frames > 1 { travel * frame / (num_frames - 1) } else { 0 };
		let y = (height - SPRITE) / 2;

		store.insert(id, sprite(width, height, x, y, 0));
		id = id.checked_add(1).context("Resource ids overflow")?;
		if config.animation.transparent {
			store.insert(id, sprite(width, height, x, y, SPRITE / 3));
			id = id.checked_add(1).context("Resource ids overflow")?;
		}
	}
	Ok(store)
}

// white square at (x, y), shrunk by `inset` on every side
fn sprite(width: u32, height: u32, x: u32, y: u32, inset: u32) -> ImageData {
	let side = SPRITE - 2 * inset;
	ImageData::from_fn(width, height, |px, py| {
		let inside = (x + inset..x + inset + side).contains(&px)
			&& (y + inset..y + inset + side).contains(&py);
		Luma([if inside { 255 } else { 0 }])
	})
}
