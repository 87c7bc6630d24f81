use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// suffix of the video container, compared case-insensitive
pub const VIDEO_SUFFIX: &str = ".webm";

/// Sticker as delivered by the pack catalog and stored at the favorites.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerReference {
	///unique identifier of the sticker
	pub id: String,
	///url of the sticker file, its suffix decides how the sticker is decoded
	#[serde(default)]
	pub file_url: String
}

impl StickerReference {
	pub fn new<I, U>(id: I, file_url: U) -> Self
	where
		I: Into<String>,
		U: Into<String>
	{
		Self {
			id: id.into(),
			file_url: file_url.into()
		}
	}
}

/// Encodings a sticker can have.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StickerFormat {
	/// gzip compressed vector animation json
	Tgs,
	/// muted looping video
	Video
}

impl StickerFormat {
	/// Decide the format from the suffix of `file_url`.
	///
	/// Returns `None` for an empty url, those stickers are not rendered at all.
	pub fn from_url(file_url: &str) -> Option<Self> {
		let file_url = file_url.trim();
		if file_url.is_empty() {
			return None;
		}
		let is_video = file_url.len() >= VIDEO_SUFFIX.len()
			&& file_url
				.get(file_url.len() - VIDEO_SUFFIX.len()..)
				.map(|suffix| suffix.eq_ignore_ascii_case(VIDEO_SUFFIX))
				.unwrap_or(false);
		Some(if is_video { Self::Video } else { Self::Tgs })
	}
}

/// A [`StickerReference`] together with its format, which is computed once
/// when the reference enters the system.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "StickerReference", into = "StickerReference")]
pub struct Sticker {
	reference: StickerReference,
	format: Option<StickerFormat>
}

impl Sticker {
	pub fn id(&self) -> &str {
		&self.reference.id
	}

	pub fn file_url(&self) -> &str {
		&self.reference.file_url
	}

	pub fn format(&self) -> Option<StickerFormat> {
		self.format
	}

	pub fn reference(&self) -> &StickerReference {
		&self.reference
	}
}

impl From<StickerReference> for Sticker {
	fn from(reference: StickerReference) -> Self {
		let format = StickerFormat::from_url(&reference.file_url);
		Self { reference, format }
	}
}

impl From<Sticker> for StickerReference {
	fn from(value: Sticker) -> Self {
		value.reference
	}
}
