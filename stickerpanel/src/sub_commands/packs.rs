use super::{catalog_source, load_packs};
use clap::Parser;
use colored::*;
use stickerlib::sticker::StickerFormat;

#[derive(Debug, Parser)]
pub struct Opt {
	/// Catalog url or local json file; defaults to `panel.catalog_url` of the config
	#[clap(short, long)]
	catalog: Option<String>,

	/// also list every sticker
	#[clap(short, long)]
	stickers: bool
}

#[tokio::main]
pub async fn run(opt: Opt) -> anyhow::Result<()> {
	let source = catalog_source(opt.catalog)?;
	let packs = load_packs(&source).await?;
	if packs.is_empty() {
		println!("{}", "catalog does not contain any sticker pack".yellow());
		return Ok(());
	}
	for (i, pack) in packs.iter().enumerate() {
		let videos = pack
			.stickers
			.iter()
			.filter(|sticker| sticker.format() == Some(StickerFormat::Video))
			.count();
		println!(
			"{:02} {} ({}): {} stickers, {} video",
			i + 1,
			pack.name.bold(),
			pack.id,
			pack.stickers.len(),
			videos
		);
		if let Some(thumbnail) = pack.thumbnail() {
			println!("   thumbnail {thumbnail}");
		}
		if opt.stickers {
			for sticker in &pack.stickers {
				let format = match sticker.format() {
					Some(format) => format.to_string().normal(),
					None => "missing".red()
				};
				println!("   - {:<24} {:<7} {}", sticker.id(), format, sticker.file_url());
			}
		}
	}
	Ok(())
}
