use crate::STORAGE_DIR;
use clap::Parser;
use colored::*;
use stickerlib::{
	favorites::{FavoritesStore, ToggleOutcome},
	sticker::StickerReference,
	storage::FileStorage
};

#[derive(Debug, Parser)]
pub enum Opt {
	/// list the favorite stickers
	List,
	/// add a sticker to the favorites, or remove it if it is already one
	Toggle {
		/// sticker id
		id: String,
		/// url of the sticker file
		file_url: String
	}
}

pub fn run(opt: Opt) -> anyhow::Result<()> {
	let store = FavoritesStore::load(FileStorage::new(&*STORAGE_DIR)?);
	match opt {
		Opt::List => {
			if store.is_empty() {
				println!("no favorite stickers yet");
			}
			for (i, favorite) in store.list().iter().enumerate() {
				println!("{:02} {} {}", i + 1, favorite.id.bold(), favorite.file_url);
			}
		},
		Opt::Toggle { id, file_url } => match store.toggle(&StickerReference::new(id, file_url))? {
			ToggleOutcome::Added => println!("{}", "Added to favorites".green()),
			ToggleOutcome::Removed => println!("{}", "Removed from favorites".yellow())
		}
	}
	Ok(())
}
