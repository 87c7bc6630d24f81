#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use directories::ProjectDirs;
use env_logger::Env;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::{fs, io, path::PathBuf, process::exit};

mod sub_commands;
use sub_commands::*;

const CONFIG_FILE: &str = "config.toml";
const CARGO_PKG_NAME: &str = env!("CARGO_PKG_NAME");
static PROJECT_DIRS: Lazy<ProjectDirs> =
	Lazy::new(|| ProjectDirs::from("edu", "campus", CARGO_PKG_NAME).expect("failed to get project dirs"));
static STORAGE_DIR: Lazy<PathBuf> = Lazy::new(|| PROJECT_DIRS.data_dir().join("storage"));

/// Load `config.toml` from the config dir. A missing file means default settings.
pub fn load_config_file() -> anyhow::Result<Config> {
	let path = PROJECT_DIRS.config_dir().join(CONFIG_FILE);
	let text = match fs::read_to_string(&path) {
		Ok(text) => text,
		Err(error) if error.kind() == io::ErrorKind::NotFound => {
			log::info!("no config file at {}, using defaults", path.display());
			return Ok(Config::default());
		},
		Err(error) => {
			return Err(error).with_context(|| format!("Failed to open config file {:?}", path.to_string_lossy()))
		}
	};
	let config: Config =
		toml::from_str(&text).with_context(|| format!("Failed to parse config file {:?}", path.to_string_lossy()))?;
	Ok(config)
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub panel: stickerlib::config::Config
}

#[derive(Debug, Parser)]
#[clap(version, about)]
enum Opt {
	/// list the sticker packs of the catalog
	Packs(packs::Opt),
	/// decode a single sticker and show what the player would play
	Decode(decode::Opt),
	/// load every sticker of the catalog, like an opened panel does
	Prefetch(prefetch::Opt),
	/// show or change the favorite stickers
	#[clap(subcommand)]
	Favorites(favorites::Opt),
	/// print shell completion for a given shell
	ShellCompletion(print_shell_completion::Opt)
}

fn main() {
	env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
	let result = match Opt::parse() {
		Opt::Packs(opt) => packs::run(opt),
		Opt::Decode(opt) => decode::run(opt),
		Opt::Prefetch(opt) => prefetch::run(opt),
		Opt::Favorites(opt) => favorites::run(opt),
		Opt::ShellCompletion(opt) => print_shell_completion::run(opt)
	};
	if let Err(error) = result {
		eprintln!("{error:?}");
		exit(1);
	}
}
