use super::load_file;
use anyhow::bail;
use clap::Parser;
use colored::*;
use stickerlib::{player::tgs::decode_tgs, sticker::StickerFormat};

#[derive(Debug, Parser)]
pub struct Opt {
	/// Sticker url or local file
	source: String,

	/// print the decoded animation document
	#[clap(short, long)]
	json: bool,

	/// pretty human readable json
	#[clap(short, long, requires = "json")]
	pretty: bool
}

#[tokio::main]
pub async fn run(opt: Opt) -> anyhow::Result<()> {
	match StickerFormat::from_url(&opt.source) {
		None => bail!("no sticker given"),
		Some(StickerFormat::Video) => {
			let data = load_file(&opt.source).await?;
			println!(
				"{} video sticker, {} bytes; played muted and looping by the host",
				"ok".green(),
				data.len()
			);
		},
		Some(StickerFormat::Tgs) => {
			let data = load_file(&opt.source).await?;
			let animation = match decode_tgs(&data) {
				Ok(animation) => animation,
				Err(error) => {
					println!("{} sticker would be shown as unavailable", "error".red());
					return Err(error.into());
				}
			};
			println!(
				"{} vector sticker {}x{}, {} frames at {} fps ({:.2}s)",
				"ok".green(),
				animation.width,
				animation.height,
				animation.frames(),
				animation.frame_rate,
				animation.duration().unwrap_or_default().as_secs_f64()
			);
			if opt.json {
				let json = match opt.pretty {
					true => serde_json::to_string_pretty(&animation.data)?,
					false => serde_json::to_string(&animation.data)?
				};
				println!("{json}");
			}
		}
	}
	Ok(())
}
