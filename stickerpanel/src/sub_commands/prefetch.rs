use super::{catalog_source, load_packs};
use crate::load_config_file;
use clap::Parser;
use colored::*;
use futures_util::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use stickerlib::{
	fetch::HttpFetcher,
	player::{video::HeadlessSurface, Player, StickerRenderer, TileView},
	sticker::Sticker
};
use std::sync::Arc;

#[derive(Debug, Parser)]
pub struct Opt {
	/// Catalog url or local json file; defaults to `panel.catalog_url` of the config
	#[clap(short, long)]
	catalog: Option<String>,

	/// only load the pack with this id
	#[clap(short, long)]
	pack: Option<String>
}

#[tokio::main]
pub async fn run(opt: Opt) -> anyhow::Result<()> {
	let config = load_config_file()?;
	let source = catalog_source(opt.catalog)?;
	let packs = load_packs(&source).await?;
	let stickers: Vec<(String, Sticker)> = packs
		.into_iter()
		.filter(|pack| opt.pack.as_ref().map_or(true, |id| &pack.id == id))
		.flat_map(|pack| {
			let name = pack.name;
			pack.stickers.into_iter().map(move |sticker| (name.clone(), sticker))
		})
		.collect();

	let pb = ProgressBar::new(stickers.len() as u64);
	pb.set_style(
		ProgressStyle::default_bar()
			.template("[{wide_bar:.cyan/blue}] {pos:>3}/{len} {msg}")?
			.progress_chars("#> ")
	);

	let fetcher = Arc::new(HttpFetcher);
	let mut players = Vec::new();
	let mut tasks = Vec::new();
	for (pack, sticker) in &stickers {
		let player = Player::for_sticker(sticker, Arc::clone(&fetcher), config.panel.playback, || {
			Box::new(HeadlessSurface::new())
		});
		let Some(mut player) = player else {
			pb.println(format!("    skip sticker {} of {pack}, it has no file", sticker.id()).yellow().to_string());
			pb.inc(1);
			continue;
		};
		if let Some(task) = player.mount() {
			let pb = pb.clone();
			tasks.push(async move {
				task.await;
				pb.inc(1);
			});
		} else {
			pb.inc(1);
		}
		players.push((pack, player));
	}
	join_all(tasks).await;
	pb.finish();

	let mut unavailable = 0;
	for (pack, player) in &players {
		if player.view() == TileView::Unavailable {
			unavailable += 1;
			pb.println(
				format!("ERROR: sticker {} of {pack} is unavailable", player.sticker().id())
					.red()
					.to_string()
			);
		}
	}
	if unavailable == 0 {
		println!("{}", format!("all {} stickers can be shown", players.len()).green());
	} else {
		println!(
			"{}",
			format!("{unavailable} of {} stickers would show a placeholder", players.len()).yellow()
		);
	}
	Ok(())
}
