use crate::{
	error::{Error, StatusError},
	get_client,
	sticker::Sticker
};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerPack {
	///unique id
	pub id: String,
	///display name
	pub name: String,
	#[serde(default)]
	pub thumbnail_url: String,
	pub stickers: Vec<Sticker>
}

impl StickerPack {
	/// Thumbnail of the pack; the first sticker if none was set.
	pub fn thumbnail(&self) -> Option<&str> {
		if !self.thumbnail_url.is_empty() {
			return Some(&self.thumbnail_url);
		}
		self.stickers
			.first()
			.map(|sticker| sticker.file_url())
			.filter(|url| !url.is_empty())
	}

	pub fn sticker(&self, id: &str) -> Option<&Sticker> {
		self.stickers.iter().find(|sticker| sticker.id() == id)
	}
}

/// Source of the sticker packs shown at the panel.
pub trait PackCatalog {
	async fn fetch_packs(&self) -> Result<Vec<StickerPack>, Error>;
}

/// Catalog served as json array of packs.
#[derive(Clone, Debug)]
pub struct HttpPackCatalog {
	url: String
}

impl HttpPackCatalog {
	pub fn new<U>(url: U) -> Self
	where
		U: Into<String>
	{
		Self { url: url.into() }
	}
}

impl PackCatalog for HttpPackCatalog {
	async fn fetch_packs(&self) -> Result<Vec<StickerPack>, Error> {
		let response = get_client().get(&self.url).send().await?;
		let status = response.status();
		if !status.is_success() {
			return Err(StatusError {
				url: self.url.clone(),
				status
			}
			.into());
		}
		let packs: Vec<StickerPack> = response.json().await?;
		info!("found {} sticker packs at {}", packs.len(), self.url);
		Ok(packs)
	}
}

/// Fixed packs, e.g. read from a file.
#[derive(Clone, Debug, Default)]
pub struct StaticPackCatalog {
	packs: Vec<StickerPack>
}

impl StaticPackCatalog {
	pub fn new(packs: Vec<StickerPack>) -> Self {
		Self { packs }
	}

	pub fn from_json(json: &str) -> Result<Self, Error> {
		Ok(Self::new(serde_json::from_str(json)?))
	}
}

impl PackCatalog for StaticPackCatalog {
	async fn fetch_packs(&self) -> Result<Vec<StickerPack>, Error> {
		Ok(self.packs.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sticker::StickerFormat;
	use pretty_assertions::assert_eq;

	const CATALOG: &str = r#"[
		{
			"id": "cats",
			"name": "Campus Cats",
			"thumbnailUrl": "https://cdn.example.org/cats/thumb.tgs",
			"stickers": [
				{"id": "cat-1", "fileUrl": "https://cdn.example.org/cats/1.tgs"},
				{"id": "cat-2", "fileUrl": "https://cdn.example.org/cats/2.WEBM"}
			]
		},
		{
			"id": "food",
			"name": "Dining Hall",
			"stickers": [
				{"id": "food-1", "fileUrl": "https://cdn.example.org/food/1.tgs"}
			]
		}
	]"#;

	#[tokio::test]
	async fn static_catalog_keeps_order_and_formats() {
		let packs = StaticPackCatalog::from_json(CATALOG).unwrap().fetch_packs().await.unwrap();
		assert_eq!(
			packs.iter().map(|pack| pack.id.as_str()).collect::<Vec<_>>(),
			vec!["cats", "food"]
		);
		let formats: Vec<_> = packs[0].stickers.iter().map(Sticker::format).collect();
		assert_eq!(formats, vec![Some(StickerFormat::Tgs), Some(StickerFormat::Video)]);
	}

	#[test]
	fn thumbnail_falls_back_to_first_sticker() {
		let packs: Vec<StickerPack> = serde_json::from_str(CATALOG).unwrap();
		assert_eq!(packs[0].thumbnail(), Some("https://cdn.example.org/cats/thumb.tgs"));
		assert_eq!(packs[1].thumbnail(), Some("https://cdn.example.org/food/1.tgs"));
		assert_eq!(packs[1].sticker("food-1").unwrap().file_url(), "https://cdn.example.org/food/1.tgs");
	}

	#[test]
	fn invalid_catalog_is_an_error() {
		assert!(matches!(StaticPackCatalog::from_json("{}"), Err(Error::Json(_))));
	}
}
