use crate::{gesture::LongPressConfig, player::PlaybackOptions, toast::DEFAULT_TOAST_DURATION};
use serde::Deserialize;
use std::time::Duration;

/// Settings of the sticker panel, usually the `[panel]` table of the config file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
	/// url of the json pack catalog
	pub catalog_url: Option<String>,
	pub long_press: LongPressConfig,
	pub playback: PlaybackOptions,
	/// how long a favorites toast stays visible
	pub toast_ms: u64
}

impl Config {
	pub fn toast_duration(&self) -> Duration {
		Duration::from_millis(self.toast_ms)
	}
}

impl Default for Config {
	fn default() -> Self {
		Self {
			catalog_url: None,
			long_press: LongPressConfig::default(),
			playback: PlaybackOptions::default(),
			toast_ms: DEFAULT_TOAST_DURATION.as_millis() as u64
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn empty_config_uses_defaults() {
		let config: Config = serde_json::from_str("{}").unwrap();
		assert_eq!(config.catalog_url, None);
		assert_eq!(config.long_press, LongPressConfig::default());
		assert_eq!(config.playback, PlaybackOptions::default());
		assert_eq!(config.toast_duration(), Duration::from_secs(2));
	}

	#[test]
	fn partial_config_overrides() {
		let config: Config = serde_json::from_str(
			r#"{
				"catalog_url": "https://portal.example.edu/api/stickers/packs",
				"long_press": {"touch_ms": 500, "mouse_ms": 500},
				"playback": {"autoplay": true, "loop": false},
				"toast_ms": 1500
			}"#
		)
		.unwrap();
		assert_eq!(config.long_press, LongPressConfig::uniform(Duration::from_millis(500)));
		assert_eq!(config.playback, PlaybackOptions {
			autoplay: true,
			looping: false
		});
		assert_eq!(config.toast_duration(), Duration::from_millis(1500));
	}
}
