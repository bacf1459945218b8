use flipbook_rs::prelude::*;
use image::Luma;

use crate::{SCREEN, bar_frames, lit_bar};

fn white(screen: &ImageData, x: u32, y: u32) -> bool {
	screen.get_pixel(x, y).0[0] == 255
}

#[test_log::test]
fn test_position_offsets_frames() {
	let mut display = LayerTree::new(SCREEN);
	let mut store = MemoryStore::with_frames(1, [ImageData::from_pixel(8, 8, Luma([255]))]);
	let root = display.root();
	let anim = Animation::new(
		&mut display,
		&mut store,
		root,
		&AnimationConfig::new(1, 1).at(Point::new(10, 20)),
	)
	.unwrap();

	let screen = display.compose(&store);
	assert!(white(&screen, 10, 20));
	assert!(white(&screen, 17, 27));
	assert!(!white(&screen, 9, 20));
	assert!(!white(&screen, 18, 27));

	anim.deinit(&mut display, &mut store);
}

#[test_log::test]
fn test_transparent_frame_masks_image() {
	let mut display = LayerTree::new(SCREEN);
	let mut store = MemoryStore::new();
	// white square with a 4x4 hole punched by the mask
	store.insert(1, ImageData::from_pixel(8, 8, Luma([255])));
	store.insert(
		2,
		ImageData::from_fn(8, 8, |x, y| {
			Luma([if (2..6).contains(&x) && (2..6).contains(&y) { 255 } else { 0 }])
		}),
	);
	let root = display.root();
	let anim = Animation::new(
		&mut display,
		&mut store,
		root,
		&AnimationConfig::new(1, 1).transparent(true),
	)
	.unwrap();

	let screen = display.compose(&store);
	assert!(white(&screen, 0, 0));
	assert!(white(&screen, 1, 6));
	assert!(!white(&screen, 2, 2));
	assert!(!white(&screen, 5, 5));
	assert!(white(&screen, 6, 6));

	anim.deinit(&mut display, &mut store);
}

#[test_log::test]
fn test_hidden_animation_leaves_screen_blank() {
	let mut display = LayerTree::new(SCREEN);
	let mut store = MemoryStore::with_frames(1, bar_frames(3));
	let root = display.root();
	let mut anim = Animation::new(
		&mut display,
		&mut store,
		root,
		&AnimationConfig::new(1, 3).hidden_at_rest(true),
	)
	.unwrap();
	assert_eq!(lit_bar(&display.compose(&store)), None);

	anim.start().unwrap();
	let options = PlaybackOptions::new(PlaybackMode::Linear, 20, false);
	let _ = anim.tick(&mut display, &mut store, &options).unwrap();
	let _ = anim.tick(&mut display, &mut store, &options).unwrap();
	assert_eq!(lit_bar(&display.compose(&store)), Some(1));

	anim.deinit(&mut display, &mut store);
	assert_eq!(store.outstanding(), 0);
}
