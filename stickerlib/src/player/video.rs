//! Video stickers, played by a muted inline video element of the host.

use super::{PlaybackOptions, StickerRenderer, TileView};
use log::debug;
use std::{
	sync::{Arc, Mutex, PoisonError},
	time::Duration
};
use thiserror::Error;

/// The host refused to start playback, e.g. because of an autoplay policy.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("playback was rejected by the host: {0}")]
pub struct PlayRejected(pub String);

/// Muted, inline video element provided by the host.
pub trait VideoSurface: Send {
	/// Point the element at `url`. The element is always muted and inline.
	fn load(&mut self, url: &str, looping: bool);

	fn play(&mut self) -> Result<(), PlayRejected>;

	fn pause(&mut self);

	/// seek to the first frame
	fn rewind(&mut self);
}

pub struct VideoPlayer {
	surface: Box<dyn VideoSurface>,
	options: PlaybackOptions,
	source: String,
	failed: bool,
	playing: bool,
	hovered: bool
}

impl VideoPlayer {
	pub fn new<U>(surface: Box<dyn VideoSurface>, url: U, options: PlaybackOptions) -> Self
	where
		U: Into<String>
	{
		Self {
			surface,
			options,
			source: url.into(),
			failed: false,
			playing: false,
			hovered: false
		}
	}

	pub fn source(&self) -> &str {
		&self.source
	}

	/// Load the source. Plays right away with autoplay, or if the pointer is
	/// still over the tile.
	pub fn mount(&mut self) {
		self.failed = false;
		self.surface.load(&self.source, self.options.looping);
		if self.options.autoplay || self.hovered {
			self.try_play();
		} else {
			self.stop();
		}
	}

	pub fn unmount(&mut self) {
		self.surface.pause();
		self.playing = false;
		self.hovered = false;
	}

	/// show another video; clears a previous error
	pub fn set_source<U>(&mut self, url: U)
	where
		U: Into<String>
	{
		self.source = url.into();
		self.mount();
	}

	/// The element failed to load or decode the video.
	pub fn on_resource_error(&mut self) {
		debug!("video sticker {:?} is unavailable", self.source);
		self.failed = true;
		self.playing = false;
	}

	/// The element reached the end of a non looping video.
	pub fn on_ended(&mut self) {
		if !self.options.looping {
			self.playing = false;
		}
	}

	fn try_play(&mut self) {
		if self.failed {
			return;
		}
		match self.surface.play() {
			Ok(()) => self.playing = true,
			Err(err) => {
				// muted videos stay visible, a later gesture can start them
				debug!("could not start video sticker {:?}: {err}", self.source);
				self.playing = false;
			}
		}
	}

	fn stop(&mut self) {
		self.surface.pause();
		self.surface.rewind();
		self.playing = false;
	}
}

impl StickerRenderer for VideoPlayer {
	fn view(&self) -> TileView {
		if self.failed {
			TileView::Unavailable
		} else {
			TileView::Video { playing: self.playing }
		}
	}

	fn pointer_enter(&mut self) {
		if !self.options.autoplay {
			self.hovered = true;
			if !self.playing {
				self.try_play();
			}
		}
	}

	fn pointer_leave(&mut self) {
		if !self.options.autoplay {
			self.hovered = false;
			if !self.failed {
				self.stop();
			}
		}
	}

	/// the element plays on its own
	fn advance(&mut self, _elapsed: Duration) {}
}

/// Calls received by a [`HeadlessSurface`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SurfaceCall {
	Load { url: String, looping: bool },
	Play,
	Pause,
	Rewind
}

#[derive(Debug, Default)]
struct HeadlessState {
	calls: Vec<SurfaceCall>,
	reject_play: Option<String>
}

/// Surface without any output, for hosts that do not show video
/// (like the command line) and for tests. Clones share their state.
#[derive(Clone, Debug, Default)]
pub struct HeadlessSurface {
	state: Arc<Mutex<HeadlessState>>
}

impl HeadlessSurface {
	pub fn new() -> Self {
		Self::default()
	}

	/// reject every following play call, like a strict autoplay policy does
	pub fn reject_play<R>(&self, reason: R)
	where
		R: Into<String>
	{
		self.lock().reject_play = Some(reason.into());
	}

	pub fn allow_play(&self) {
		self.lock().reject_play = None;
	}

	pub fn calls(&self) -> Vec<SurfaceCall> {
		self.lock().calls.clone()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, HeadlessState> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

impl VideoSurface for HeadlessSurface {
	fn load(&mut self, url: &str, looping: bool) {
		self.lock().calls.push(SurfaceCall::Load {
			url: url.to_owned(),
			looping
		});
	}

	fn play(&mut self) -> Result<(), PlayRejected> {
		let mut state = self.lock();
		state.calls.push(SurfaceCall::Play);
		match &state.reject_play {
			Some(reason) => Err(PlayRejected(reason.clone())),
			None => Ok(())
		}
	}

	fn pause(&mut self) {
		self.lock().calls.push(SurfaceCall::Pause);
	}

	fn rewind(&mut self) {
		self.lock().calls.push(SurfaceCall::Rewind);
	}
}
