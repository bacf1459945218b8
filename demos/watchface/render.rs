//! ASCII rendering of the composed screen.

use flipbook_rs::prelude::*;

/// Screen pixels per character cell, horizontally and vertically
const CELL: (u32, u32) = (4, 8);

const WHITE_THRESHOLD: u8 = 128;

pub fn print_screen(screen: &ImageData, now_ms: u64, frame_index: u32) {
	println!("+{:-<1$}+ {2:>6} ms, frame {3}", "", cols(screen), now_ms, frame_index);
	for row in 0..screen.height().div_ceil(CELL.1) {
		let line: String = (0..cols(screen))
			.map(|col| if cell_is_lit(screen, col, row) { '#' } else { ' ' })
			.collect();
		println!("|{line}|");
	}
	println!("+{:-<1$}+", "", cols(screen));
}

fn cols(screen: &ImageData) -> usize {
	screen.width().div_ceil(CELL.0) as usize
}

fn cell_is_lit(screen: &ImageData, col: usize, row: u32) -> bool {
	let x0 = col as u32 * CELL.0;
	let y0 = row * CELL.1;
	(y0..(y0 + CELL.1).min(screen.height())).any(|y| {
		(x0..(x0 + CELL.0).min(screen.width()))
			.any(|x| screen.get_pixel(x, y).0[0] >= WHITE_THRESHOLD)
	})
}
