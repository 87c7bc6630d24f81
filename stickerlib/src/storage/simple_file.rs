use super::Storage;
use anyhow::{bail, Context};
use std::{
	fs, io,
	path::{Path, PathBuf}
};

/// simple implemtation of the `Storage` trait,
/// which saves every key as `<key>.json` inside one directory
#[derive(Debug)]
pub struct FileStorage {
	dir: PathBuf
}

impl FileStorage {
	pub fn new<P>(dir: P) -> io::Result<FileStorage>
	where
		P: AsRef<Path>
	{
		let dir = dir.as_ref();
		fs::create_dir_all(dir)?;
		Ok(FileStorage { dir: dir.to_owned() })
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn path(&self, key: &str) -> anyhow::Result<PathBuf> {
		if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
			bail!("invalid storage key {key:?}");
		}
		Ok(self.dir.join(format!("{key}.json")))
	}
}

impl Storage for FileStorage {
	fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
		let path = self.path(key)?;
		match fs::read_to_string(&path) {
			Ok(value) => Ok(Some(value)),
			Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(error) => Err(error).with_context(|| format!("failed to read {}", path.display()))
		}
	}

	fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
		let path = self.path(key)?;
		// replace the whole file at once, so a crash never leaves half a document behind
		let tmp = path.with_extension("json.tmp");
		fs::write(&tmp, value).with_context(|| format!("failed to write {}", tmp.display()))?;
		fs::rename(&tmp, &path).with_context(|| format!("failed to replace {}", path.display()))?;
		Ok(())
	}
}
