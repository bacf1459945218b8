//! Layered configuration for a screen hosting one animation.
//!
//! A [`FlipbookConfig`] is read from an optional TOML file, then overridden by environment
//! variables prefixed with `FLIPBOOK_`. Nested keys are separated by a double underscore, so
//! `FLIPBOOK_PLAYBACK__FPS=30` sets `playback.fps`.
//!
//! ```toml
//! [screen]
//! w = 144
//! h = 168
//!
//! [animation]
//! first_resource_id = 1
//! num_frames = 12
//! hidden_at_rest = true
//!
//! [playback]
//! mode = "alternating"
//! fps = 20
//! continuous = true
//!
//! [frames]
//! kind = "directory"
//! path = "assets/frames"
//! prefix = "frame_"
//! extension = "png"
//! ```
//!
//! Every key left out falls back to [`FlipbookConfig::default`], which describes the classic
//! watch face: a 144x168 screen looping 12 synthetic frames at 20 fps.

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
	anim::{AnimationConfig, PlaybackMode, PlaybackOptions},
	error::ConfigError,
	surface::Size,
};

/// Prefix of the environment variables read by [`FlipbookConfig::load`].
pub const ENV_PREFIX: &str = "FLIPBOOK";

/// Where frame images come from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FramesSource {
	/// Frames generated in memory
	#[default]
	Synthetic,
	/// Frames read from `<path>/<prefix><id>.<extension>`
	Directory {
		/// Directory holding the frame files
		path: PathBuf,
		/// File name prefix before the resource id
		#[serde(default)]
		prefix: String,
		/// File extension, without the dot
		#[serde(default = "FramesSource::default_extension")]
		extension: String,
	},
}

impl FramesSource {
	fn default_extension() -> String {
		"png".to_owned()
	}
}

/// Everything needed to put an animation on a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipbookConfig {
	/// Screen dimensions
	pub screen: Size,
	/// Animation parameters
	pub animation: AnimationConfig,
	/// Playback parameters
	pub playback: PlaybackOptions,
	/// Frame image source
	pub frames: FramesSource,
}

impl Default for FlipbookConfig {
	fn default() -> Self {
		Self {
			screen: Size::new(144, 168),
			animation: AnimationConfig::new(1, 12).hidden_at_rest(true),
			playback: PlaybackOptions::new(PlaybackMode::Linear, 20, true),
			frames: FramesSource::Synthetic,
		}
	}
}

impl FlipbookConfig {
	/// Loads the configuration from `path` (if any) and the `FLIPBOOK_*` environment.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Load`] if the file is missing or malformed, and
	/// [`ConfigError::Invalid`] / [`ConfigError::InvalidScreen`] if the values are out of range.
	pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		Self::load_with_env(path, None)
	}

	/// Parses a TOML document, without looking at the environment.
	///
	/// # Errors
	///
	/// Same as [`load`](Self::load).
	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		Self::finish(Self::defaults()?.add_source(File::from_str(text, FileFormat::Toml)))
	}

	/// Checks every section.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidScreen`] for an empty screen and [`ConfigError::Invalid`]
	/// for bad animation or playback parameters.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.screen.w == 0 || self.screen.h == 0 {
			return Err(ConfigError::InvalidScreen {
				width: self.screen.w,
				height: self.screen.h,
			});
		}
		self.animation.validate()?;
		self.playback.validate()?;
		Ok(())
	}

	// `env` replaces the process environment when set
	fn load_with_env(
		path: Option<&Path>,
		env: Option<config::Map<String, String>>,
	) -> Result<Self, ConfigError> {
		let mut builder = Self::defaults()?;
		if let Some(path) = path {
			debug!("Reading configuration from {}", path.display());
			builder = builder.add_source(File::from(path).format(FileFormat::Toml));
		}
		let environment = Environment::with_prefix(ENV_PREFIX)
			.prefix_separator("_")
			.separator("__")
			.try_parsing(true)
			.source(env);
		Self::finish(builder.add_source(environment))
	}

	// lowest layer, so that partial sections merge over the defaults key by key
	fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
		Ok(Config::builder().add_source(Config::try_from(&Self::default())?))
	}

	fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
		let config: Self = builder.build()?.try_deserialize()?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{error::AnimationError, surface::Point};

	fn env(vars: &[(&str, &str)]) -> config::Map<String, String> {
		vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
	}

	#[test]
	fn test_defaults_describe_watch_face() {
		let config = FlipbookConfig::load_with_env(None, Some(env(&[]))).unwrap();
		assert_eq!(config, FlipbookConfig::default());
		assert_eq!(config.screen, Size::new(144, 168));
		assert_eq!(config.animation.num_frames, 12);
		assert!(config.animation.hidden_at_rest);
		assert!(config.playback.continuous);
		assert_eq!(config.frames, FramesSource::Synthetic);
	}

	#[test]
	fn test_from_toml() {
		let config = FlipbookConfig::from_toml(
			r#"
			[animation]
			first_resource_id = 40
			num_frames = 6
			transparent = true
			position = { x = 10, y = 20 }

			[playback]
			mode = "alternating"
			fps = 10

			[frames]
			kind = "directory"
			path = "assets/frames"
			prefix = "walk_"
			"#,
		)
		.unwrap();

		assert_eq!(config.screen, Size::new(144, 168));
		assert_eq!(config.animation.first_resource_id, 40);
		assert!(config.animation.transparent);
		assert!(config.animation.hidden_at_rest);
		assert_eq!(config.animation.position, Point::new(10, 20));
		assert_eq!(config.playback, PlaybackOptions::new(PlaybackMode::Alternating, 10, true));
		assert_eq!(
			config.frames,
			FramesSource::Directory {
				path: PathBuf::from("assets/frames"),
				prefix: "walk_".to_owned(),
				extension: "png".to_owned(),
			}
		);
	}

	#[test]
	fn test_environment_overrides() {
		let config = FlipbookConfig::load_with_env(
			None,
			Some(env(&[
				("FLIPBOOK_PLAYBACK__FPS", "30"),
				("FLIPBOOK_PLAYBACK__MODE", "alternating"),
				("FLIPBOOK_SCREEN__W", "200"),
				("FLIPBOOK_SCREEN__H", "240"),
				("UNRELATED_PLAYBACK__FPS", "1"),
			])),
		)
		.unwrap();

		assert_eq!(config.playback.fps, 30);
		assert_eq!(config.playback.mode, PlaybackMode::Alternating);
		assert_eq!(config.screen, Size::new(200, 240));
		// untouched sections keep their defaults
		assert!(config.playback.continuous);
		assert_eq!(config.animation, FlipbookConfig::default().animation);
	}

	#[test]
	fn test_rejects_invalid_values() {
		let err = FlipbookConfig::from_toml("[playback]\nfps = 0\n").unwrap_err();
		assert!(matches!(err, ConfigError::Invalid(AnimationError::InvalidFps(0))));

		let err = FlipbookConfig::from_toml(
			"[animation]\nfirst_resource_id = 1\nnum_frames = 0\n",
		)
		.unwrap_err();
		assert!(matches!(err, ConfigError::Invalid(AnimationError::InvalidFrameCount(0))));

		let err = FlipbookConfig::from_toml("[screen]\nw = 0\nh = 168\n").unwrap_err();
		assert!(matches!(
			err,
			ConfigError::InvalidScreen {
				width: 0,
				height: 168
			}
		));
	}

	#[test]
	fn test_missing_file() {
		let path = std::env::temp_dir().join("flipbook-config-does-not-exist.toml");
		let err = FlipbookConfig::load_with_env(Some(&path), Some(env(&[]))).unwrap_err();
		assert!(matches!(err, ConfigError::Load(_)));
	}

	#[test]
	fn test_unknown_mode() {
		let err = FlipbookConfig::from_toml("[playback]\nmode = \"shuffle\"\n").unwrap_err();
		assert!(matches!(err, ConfigError::Load(_)));
	}
}
