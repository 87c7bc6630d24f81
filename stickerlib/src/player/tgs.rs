//! Vector stickers: gzip compressed lottie json, as used by Telegram (`.tgs`).

use super::{LoadTask, PlaybackOptions, StickerRenderer, TileView};
use crate::{error::Error, fetch::Fetcher};
use flate2::read::GzDecoder;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::{
	io::Read,
	sync::{
		atomic::{AtomicU64, Ordering},
		Arc
	},
	time::Duration
};
use tokio::sync::watch;

/// the part of the lottie document the player needs to know
#[derive(Debug, Deserialize)]
struct Header {
	///frame rate
	fr: f64,
	///in point, first frame
	ip: f64,
	///out point, frame after the last one
	op: f64,
	#[serde(default)]
	w: u32,
	#[serde(default)]
	h: u32
}

/// A decoded vector animation.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
	/// the complete document, handed to the vector renderer
	pub data: Value,
	pub frame_rate: f64,
	pub in_point: f64,
	pub out_point: f64,
	pub width: u32,
	pub height: u32
}

impl Animation {
	/// number of frames between in and out point
	pub fn frames(&self) -> f64 {
		self.out_point - self.in_point
	}

	/// Playback time of one loop; `None` if it does not fit a [`Duration`].
	pub fn duration(&self) -> Option<Duration> {
		Duration::try_from_secs_f64(self.frames() / self.frame_rate).ok()
	}
}

/// Decompress and parse a `tgs` file.
pub fn decode_tgs(data: &[u8]) -> Result<Animation, Error> {
	let mut json = Vec::new();
	GzDecoder::new(data).read_to_end(&mut json)?;
	let json = String::from_utf8(json)?;
	let data: Value = serde_json::from_str(&json)?;
	let header = Header::deserialize(&data).map_err(|err| Error::NotAnimation(err.to_string()))?;
	if !(header.fr.is_finite() && header.fr > 0.0) {
		return Err(Error::NotAnimation(format!("invalid frame rate {}", header.fr)));
	}
	if !(header.ip.is_finite() && header.op.is_finite() && header.op > header.ip) {
		return Err(Error::NotAnimation(format!("invalid frame range {}..{}", header.ip, header.op)));
	}
	let animation = Animation {
		data,
		frame_rate: header.fr,
		in_point: header.ip,
		out_point: header.op,
		width: header.w,
		height: header.h
	};
	if animation.duration().is_none() {
		return Err(Error::NotAnimation(format!(
			"{} frames at {} fps do not fit a duration",
			animation.frames(),
			animation.frame_rate
		)));
	}
	Ok(animation)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DecodeState {
	/// not mounted yet, or unmounted
	#[default]
	Idle,
	Loading,
	Ready(Arc<Animation>),
	Error(String)
}

/// Download, decode and play one vector sticker.
///
/// Every call of [`load`](Self::load) starts a new request; results of older
/// requests, and of requests still running when the player is unmounted, are
/// dropped instead of being applied.
pub struct TgsPlayer<F>
where
	F: Fetcher + 'static
{
	fetcher: Arc<F>,
	options: PlaybackOptions,
	/// id of the request whose result may still be applied
	generation: Arc<AtomicU64>,
	state: Arc<watch::Sender<DecodeState>>,
	hovered: bool,
	/// frame relative to the in point
	frame: f64,
	finished: bool
}

impl<F> TgsPlayer<F>
where
	F: Fetcher + 'static
{
	pub fn new(fetcher: Arc<F>, options: PlaybackOptions) -> Self {
		let (state, _) = watch::channel(DecodeState::Idle);
		Self {
			fetcher,
			options,
			generation: Arc::new(AtomicU64::new(0)),
			state: Arc::new(state),
			hovered: false,
			frame: 0.0,
			finished: false
		}
	}

	pub fn options(&self) -> PlaybackOptions {
		self.options
	}

	pub fn state(&self) -> DecodeState {
		self.state.borrow().clone()
	}

	/// get notified about every state change
	pub fn subscribe(&self) -> watch::Receiver<DecodeState> {
		self.state.subscribe()
	}

	/// Switch to `url`.
	///
	/// The state is `Loading` as soon as this returns. The returned task fetches
	/// and decodes the file; it has to be polled (or spawned) to make progress.
	pub fn load<U>(&mut self, url: U) -> LoadTask
	where
		U: Into<String>
	{
		let url = url.into();
		self.frame = 0.0;
		self.finished = false;

		let mut request = 0;
		let generation = Arc::clone(&self.generation);
		self.state.send_modify(|state| {
			request = generation.fetch_add(1, Ordering::SeqCst) + 1;
			*state = DecodeState::Loading;
		});

		let fetcher = Arc::clone(&self.fetcher);
		let state = Arc::clone(&self.state);
		Box::pin(async move {
			let result = match fetcher.fetch(&url).await {
				Ok(data) => decode_tgs(&data),
				Err(err) => Err(err)
			};
			let (next, failure) = match result {
				Ok(animation) => (DecodeState::Ready(Arc::new(animation)), None),
				Err(err) => {
					let reason = err.to_string();
					(DecodeState::Error(reason.clone()), Some(reason))
				}
			};
			let applied = state.send_if_modified(|state| {
				if generation.load(Ordering::SeqCst) != request {
					return false;
				}
				*state = next;
				true
			});
			match failure {
				_ if !applied => debug!("discard outdated result for sticker {url:?}"),
				Some(reason) => warn!("failed to load sticker {url:?}: {reason}"),
				None => {}
			}
		})
	}

	/// Drop the current animation; running requests become no-ops.
	pub fn unmount(&mut self) {
		let generation = Arc::clone(&self.generation);
		self.state.send_modify(|state| {
			generation.fetch_add(1, Ordering::SeqCst);
			*state = DecodeState::Idle;
		});
		self.hovered = false;
		self.frame = 0.0;
		self.finished = false;
	}

	fn is_playing(&self) -> bool {
		(self.options.autoplay || self.hovered) && !self.finished
	}
}

impl<F> StickerRenderer for TgsPlayer<F>
where
	F: Fetcher + 'static
{
	fn view(&self) -> TileView {
		match &*self.state.borrow() {
			DecodeState::Idle | DecodeState::Loading => TileView::Loading,
			DecodeState::Error(_) => TileView::Unavailable,
			DecodeState::Ready(animation) => TileView::Animation {
				frame: animation.in_point + self.frame,
				playing: self.is_playing()
			}
		}
	}

	fn pointer_enter(&mut self) {
		if !self.options.autoplay {
			self.hovered = true;
		}
	}

	fn pointer_leave(&mut self) {
		if !self.options.autoplay {
			self.hovered = false;
			self.frame = 0.0;
			self.finished = false;
		}
	}

	fn advance(&mut self, elapsed: Duration) {
		if !self.is_playing() {
			return;
		}
		let (frames, frame_rate) = match &*self.state.borrow() {
			DecodeState::Ready(animation) => (animation.frames(), animation.frame_rate),
			_ => return
		};
		if frames <= 0.0 {
			self.frame = 0.0;
			return;
		}
		self.frame += elapsed.as_secs_f64() * frame_rate;
		if self.frame >= frames {
			if self.options.looping {
				self.frame %= frames;
			} else {
				self.frame = (frames - 1.0).max(0.0);
				self.finished = true;
			}
		}
	}
}
