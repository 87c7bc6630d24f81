use crate::load_config_file;
use anyhow::{bail, Context};
use stickerlib::{
	catalog::{HttpPackCatalog, PackCatalog, StaticPackCatalog, StickerPack},
	fetch::{Fetcher, HttpFetcher}
};
use std::path::Path;

pub mod decode;
pub mod favorites;
pub mod packs;
pub mod prefetch;
pub mod print_shell_completion;

fn is_remote(source: &str) -> bool {
	source.starts_with("https://") || source.starts_with("http://")
}

/// catalog given at the command line, or the one of the config file
fn catalog_source(catalog: Option<String>) -> anyhow::Result<String> {
	if let Some(catalog) = catalog {
		return Ok(catalog);
	}
	match load_config_file()?.panel.catalog_url {
		Some(url) => Ok(url),
		None => bail!("no sticker catalog given; pass --catalog or set `panel.catalog_url` at the config file")
	}
}

/// Fetch the packs from an url or read them from a local json file.
async fn load_packs(source: &str) -> anyhow::Result<Vec<StickerPack>> {
	let packs = if is_remote(source) {
		HttpPackCatalog::new(source).fetch_packs().await
	} else {
		let json = tokio::fs::read_to_string(source)
			.await
			.with_context(|| format!("failed to read catalog {source:?}"))?;
		StaticPackCatalog::from_json(&json)?.fetch_packs().await
	};
	packs.with_context(|| format!("failed to load sticker packs from {source:?}"))
}

/// Read a sticker file from an url or the local file system.
async fn load_file(source: &str) -> anyhow::Result<Vec<u8>> {
	if is_remote(source) {
		Ok(HttpFetcher.fetch(source).await?)
	} else {
		tokio::fs::read(Path::new(source))
			.await
			.with_context(|| format!("failed to read sticker {source:?}"))
	}
}
