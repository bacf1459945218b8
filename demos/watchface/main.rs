//! Watch face demo.
//!
//! Puts a looping animation on a 144x168 screen and drives it with a real-time loop on top
//! of [`ManualScheduler`]: sleep until the next deadline, fire, tick, redraw. After
//! `--duration` seconds a stop is requested, the pass finishes and everything is torn down.
//!
//! Frames come from a directory (`--frames DIR`, files named `<prefix><id>.<ext>`) or are
//! generated in memory. Settings are layered: defaults, then `--config FILE`, then
//! `FLIPBOOK_*` environment variables, then command line flags.

mod frames;
mod render;

use std::{path::PathBuf, thread, time::Duration};

use anyhow::{Context, Result, bail};
use clap::Parser;
use flipbook_rs::prelude::*;

/// Cookie of the only timer this screen arms
const ANIMATION_COOKIE: Cookie = 1;

fn main() -> Result<()> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let config = cli.resolve_config()?;
	run(&cli, &config)
}

#[derive(Parser)]
#[command(name = "watchface")]
#[command(author = "flipbook-rs project")]
#[command(version)]
#[command(about = "Play a frame animation on a simulated watch face", long_about = None)]
struct Cli {
	/// TOML configuration file
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Directory holding the frame images, instead of generated frames
	#[arg(short, long, value_name = "DIR")]
	frames: Option<PathBuf>,

	/// File name prefix of the frame images
	#[arg(long, value_name = "PREFIX", requires = "frames")]
	prefix: Option<String>,

	/// File extension of the frame images
	#[arg(long, value_name = "EXT", requires = "frames")]
	ext: Option<String>,

	/// Number of frames
	#[arg(short = 'n', long, value_name = "COUNT")]
	num_frames: Option<u32>,

	/// Playback mode: linear or alternating
	#[arg(short, long, value_name = "MODE")]
	mode: Option<PlaybackMode>,

	/// Frames per second
	#[arg(long, value_name = "FPS")]
	fps: Option<u32>,

	/// Play a single pass instead of looping
	#[arg(long, default_value_t = false)]
	once: bool,

	/// Frames are image/mask pairs
	#[arg(long, default_value_t = false)]
	transparent: bool,

	/// Seconds to play before requesting a stop
	#[arg(short, long, value_name = "SECONDS", default_value_t = 3.0)]
	duration: f64,

	/// Delay before the first tick, in milliseconds
	#[arg(long, value_name = "MS", default_value_t = 100)]
	initial_delay: u32,

	/// Run on virtual time without sleeping
	#[arg(long, default_value_t = false)]
	no_sleep: bool,

	/// Do not draw the screen
	#[arg(short, long, default_value_t = false)]
	quiet: bool,

	/// Print the final animation state as JSON
	#[arg(long, default_value_t = false)]
	json: bool,
}

impl Cli {
	fn resolve_config(&self) -> Result<FlipbookConfig> {
		let mut config = FlipbookConfig::load(self.config.as_deref())
			.context("Failed to load configuration")?;

		if let Some(path) = &self.frames {
			let (prefix, extension) = match &config.frames {
				FramesSource::Directory {
					prefix,
					extension,
					..
				} => (prefix.clone(), extension.clone()),
				FramesSource::Synthetic => (String::new(), "png".to_owned()),
			};
			config.frames = FramesSource::Directory {
				path: path.clone(),
				prefix: self.prefix.clone().unwrap_or(prefix),
				extension: self.ext.clone().unwrap_or(extension),
			};
		}
		if let Some(num_frames) = self.num_frames {
			config.animation.num_frames = num_frames;
		}
		if let Some(mode) = self.mode {
			config.playback.mode = mode;
		}
		if let Some(fps) = self.fps {
			config.playback.fps = fps;
		}
		if self.once {
			config.playback.continuous = false;
		}
		if self.transparent {
			config.animation.transparent = true;
		}

		config.validate().context("Invalid settings")?;
		Ok(config)
	}
}

fn run(cli: &Cli, config: &FlipbookConfig) -> Result<()> {
	if !cli.duration.is_finite() || cli.duration < 0.0 {
		bail!("Duration must be a non-negative number of seconds");
	}
	let stop_at_ms = (cli.duration * 1000.0) as u64;

	let mut store = frames::open_store(config)?;
	let mut display = LayerTree::new(config.screen);
	let mut timers = ManualScheduler::new();

	let root = display.root();
	let animation = Animation::new(&mut display, &mut *store, root, &config.animation)
		.context("Failed to initialize the animation")?;
	let mut player = Player::new(animation, config.playback, ANIMATION_COOKIE)?;

	println!(
		"{} frame(s), {} at {} fps{}, screen {}x{}",
		config.animation.num_frames,
		config.playback.mode,
		config.playback.fps,
		if config.playback.continuous { ", looping" } else { "" },
		config.screen.w,
		config.screen.h
	);
	player.play(&mut timers, cli.initial_delay)?;

	let mut stop_sent = false;
	while let Some(deadline) = timers.next_deadline() {
		let wait = deadline.saturating_sub(timers.now_ms());
		if !cli.no_sleep {
			thread::sleep(Duration::from_millis(wait));
		}
		for (_, cookie) in timers.advance(wait) {
			player.handle_timer(&mut display, &mut *store, &mut timers, cookie)?;
		}

		if display.take_dirty(root) && !cli.quiet {
			let screen = display.compose(&*store);
			render::print_screen(&screen, timers.now_ms(), player.animation().frame_index());
		}

		if !stop_sent && timers.now_ms() >= stop_at_ms && player.is_playing() {
			log::info!("Requesting stop after {} ms", timers.now_ms());
			stop_sent = player.stop();
		}
	}

	let state = player.animation().snapshot();
	player.teardown(&mut display, &mut *store, &mut timers);
	if store.outstanding() != 0 {
		bail!("{} frame handle(s) still held after teardown", store.outstanding());
	}

	if cli.json {
		println!("{}", serde_json::to_string_pretty(&state)?);
	}
	println!("Stopped after {} ms", timers.now_ms());
	Ok(())
}
