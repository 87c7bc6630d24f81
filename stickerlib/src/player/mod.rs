//! Render a sticker, whatever its format is.
//!
//! [`Player::for_sticker`] looks at the format computed when the sticker entered
//! the crate and builds the matching renderer. Both renderers share the
//! [`StickerRenderer`] interface and fail with the same [`TileView::Unavailable`]
//! placeholder, so a grid never changes its layout because of a broken sticker.

use crate::{
	fetch::Fetcher,
	sticker::{Sticker, StickerFormat}
};
use serde::Deserialize;
use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

pub mod tgs;
pub mod video;

use tgs::TgsPlayer;
use video::{VideoPlayer, VideoSurface};

/// Work started by mounting a renderer. Spawn it on the runtime of the host;
/// the result is ignored once the renderer was unmounted or got a new source.
pub type LoadTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaybackOptions {
	/// play continuously; otherwise play only while hovered
	pub autoplay: bool,
	#[serde(rename = "loop")]
	pub looping: bool
}

impl Default for PlaybackOptions {
	fn default() -> Self {
		Self {
			autoplay: false,
			looping: true
		}
	}
}

/// What a tile shows right now.
#[derive(Clone, Debug, PartialEq)]
pub enum TileView {
	/// progress indicator over the tile bounds
	Loading,
	/// static "unavailable" glyph
	Unavailable,
	/// vector animation at the given frame
	Animation { frame: f64, playing: bool },
	Video { playing: bool }
}

/// Uniform interface of the two playback mechanisms.
pub trait StickerRenderer {
	fn view(&self) -> TileView;

	/// preview while hovered, if the renderer does not autoplay
	fn pointer_enter(&mut self);

	/// stop the preview and rewind to the first frame
	fn pointer_leave(&mut self);

	/// progress playback by `elapsed` wall time
	fn advance(&mut self, elapsed: Duration);
}

pub enum Renderer<F>
where
	F: Fetcher + 'static
{
	Tgs(TgsPlayer<F>),
	Video(VideoPlayer)
}

/// A renderer bound to the sticker it shows.
pub struct Player<F>
where
	F: Fetcher + 'static
{
	sticker: Sticker,
	renderer: Renderer<F>
}

impl<F> Player<F>
where
	F: Fetcher + 'static
{
	/// Pick the renderer for `sticker`.
	///
	/// Returns `None` if the sticker has no file url; nothing is rendered for it.
	/// `surface` is only called for video stickers.
	pub fn for_sticker<S>(sticker: &Sticker, fetcher: Arc<F>, options: PlaybackOptions, surface: S) -> Option<Self>
	where
		S: FnOnce() -> Box<dyn VideoSurface>
	{
		let renderer = match sticker.format()? {
			StickerFormat::Video => Renderer::Video(VideoPlayer::new(surface(), sticker.file_url(), options)),
			StickerFormat::Tgs => Renderer::Tgs(TgsPlayer::new(fetcher, options))
		};
		Some(Self {
			sticker: sticker.clone(),
			renderer
		})
	}

	pub fn sticker(&self) -> &Sticker {
		&self.sticker
	}

	pub fn renderer(&self) -> &Renderer<F> {
		&self.renderer
	}

	pub fn renderer_mut(&mut self) -> &mut Renderer<F> {
		&mut self.renderer
	}

	/// Start showing the sticker. Vector stickers return the download and decode
	/// task, video stickers are loaded by their surface.
	pub fn mount(&mut self) -> Option<LoadTask> {
		match &mut self.renderer {
			Renderer::Tgs(player) => Some(player.load(self.sticker.file_url())),
			Renderer::Video(player) => {
				player.mount();
				None
			}
		}
	}

	pub fn unmount(&mut self) {
		match &mut self.renderer {
			Renderer::Tgs(player) => player.unmount(),
			Renderer::Video(player) => player.unmount()
		}
	}
}

impl<F> StickerRenderer for Player<F>
where
	F: Fetcher + 'static
{
	fn view(&self) -> TileView {
		match &self.renderer {
			Renderer::Tgs(player) => player.view(),
			Renderer::Video(player) => player.view()
		}
	}

	fn pointer_enter(&mut self) {
		match &mut self.renderer {
			Renderer::Tgs(player) => player.pointer_enter(),
			Renderer::Video(player) => player.pointer_enter()
		}
	}

	fn pointer_leave(&mut self) {
		match &mut self.renderer {
			Renderer::Tgs(player) => player.pointer_leave(),
			Renderer::Video(player) => player.pointer_leave()
		}
	}

	fn advance(&mut self, elapsed: Duration) {
		match &mut self.renderer {
			Renderer::Tgs(player) => player.advance(elapsed),
			Renderer::Video(player) => player.advance(elapsed)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{video::HeadlessSurface, *};
	use crate::{fetch::MemoryFetcher, sticker::StickerReference};

	fn player(file_url: &str) -> Option<Player<MemoryFetcher>> {
		let sticker = Sticker::from(StickerReference::new("1", file_url));
		Player::for_sticker(
			&sticker,
			Arc::new(MemoryFetcher::new()),
			PlaybackOptions::default(),
			|| Box::new(HeadlessSurface::new())
		)
	}

	#[test]
	fn video_suffix_selects_video_player() {
		for url in ["a.webm", "b.WEBM", "https://x.org/c.WebM"] {
			assert!(matches!(player(url).unwrap().renderer(), Renderer::Video(_)), "{url}");
		}
	}

	#[test]
	fn other_suffixes_select_tgs_pipeline() {
		for url in ["a.tgs", "b.json", "https://x.org/c", "d.webm.gz"] {
			assert!(matches!(player(url).unwrap().renderer(), Renderer::Tgs(_)), "{url}");
		}
	}

	#[test]
	fn empty_url_renders_nothing() {
		assert!(player("").is_none());
	}

	#[test]
	fn surface_is_only_created_for_video() {
		let sticker = Sticker::from(StickerReference::new("1", "a.tgs"));
		let player = Player::for_sticker(
			&sticker,
			Arc::new(MemoryFetcher::new()),
			PlaybackOptions::default(),
			|| -> Box<dyn VideoSurface> { panic!("no surface needed for vector stickers") }
		);
		assert!(player.is_some());
	}

	#[tokio::test]
	async fn broken_stickers_look_the_same() {
		let mut tgs = player("missing.tgs").unwrap();
		tgs.mount().unwrap().await;
		let mut video = player("missing.webm").unwrap();
		assert!(video.mount().is_none());
		if let Renderer::Video(video) = video.renderer_mut() {
			video.on_resource_error();
		}
		assert_eq!(tgs.view(), TileView::Unavailable);
		assert_eq!(video.view(), TileView::Unavailable);
	}
}
