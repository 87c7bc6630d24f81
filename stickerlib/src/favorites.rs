use crate::{error::Error, sticker::StickerReference, storage::Storage};
use log::warn;
use std::{
	collections::HashSet,
	sync::{Mutex, MutexGuard, PoisonError}
};

/// key of the favorites document at the [`Storage`]
pub const FAVORITES_KEY: &str = "favorite_stickers";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ToggleOutcome {
	Added,
	Removed
}

/// User curated stickers across all packs, kept at client-local storage.
///
/// Every toggle reads, modifies and writes back the list while holding one lock,
/// so concurrent toggles of different panels never lose an update.
pub struct FavoritesStore<S>
where
	S: Storage
{
	storage: S,
	favorites: Mutex<Vec<StickerReference>>
}

impl<S> FavoritesStore<S>
where
	S: Storage
{
	/// Read the stored favorites. A missing or unreadable record is an empty list.
	pub fn load(storage: S) -> Self {
		let favorites = match storage.get(FAVORITES_KEY) {
			Ok(Some(json)) => match serde_json::from_str::<Vec<StickerReference>>(&json) {
				Ok(favorites) => dedup(favorites),
				Err(error) => {
					warn!("stored favorites are corrupt and will be replaced: {error}");
					Vec::new()
				}
			},
			Ok(None) => Vec::new(),
			Err(error) => {
				warn!("failed to read stored favorites: {error:?}");
				Vec::new()
			}
		};
		Self {
			storage,
			favorites: Mutex::new(favorites)
		}
	}

	/// Remove `sticker` if it is a favorite, otherwise append it. The result is
	/// stored before this returns; if that fails, nothing changes.
	pub fn toggle(&self, sticker: &StickerReference) -> Result<ToggleOutcome, Error> {
		let mut favorites = self.lock();
		let removed = favorites
			.iter()
			.position(|favorite| favorite.id == sticker.id)
			.map(|index| (index, favorites.remove(index)));
		let outcome = match removed {
			Some(_) => ToggleOutcome::Removed,
			None => {
				favorites.push(sticker.clone());
				ToggleOutcome::Added
			}
		};
		if let Err(error) = self.write(&favorites) {
			match removed {
				Some((index, favorite)) => favorites.insert(index, favorite),
				None => {
					favorites.pop();
				}
			}
			return Err(error);
		}
		Ok(outcome)
	}

	/// Write the current favorites to the storage.
	pub fn save(&self) -> Result<(), Error> {
		let favorites = self.lock();
		self.write(&favorites)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.lock().iter().any(|favorite| favorite.id == id)
	}

	pub fn list(&self) -> Vec<StickerReference> {
		self.lock().clone()
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	fn lock(&self) -> MutexGuard<'_, Vec<StickerReference>> {
		self.favorites.lock().unwrap_or_else(PoisonError::into_inner)
	}

	fn write(&self, favorites: &[StickerReference]) -> Result<(), Error> {
		let json = serde_json::to_string(favorites)?;
		self.storage.set(FAVORITES_KEY, &json).map_err(Error::Storage)
	}
}

fn dedup(favorites: Vec<StickerReference>) -> Vec<StickerReference> {
	let mut seen = HashSet::new();
	favorites
		.into_iter()
		.filter(|favorite| seen.insert(favorite.id.clone()))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::storage::{FileStorage, MemoryStorage};
	use anyhow::bail;
	use pretty_assertions::assert_eq;

	fn wave() -> StickerReference {
		StickerReference::new("wave", "https://cdn.example.org/wave.tgs")
	}

	fn dance() -> StickerReference {
		StickerReference::new("dance", "https://cdn.example.org/dance.webm")
	}

	#[test]
	fn toggle_twice_restores_membership() {
		let store = FavoritesStore::load(MemoryStorage::new());
		assert_eq!(store.toggle(&wave()).unwrap(), ToggleOutcome::Added);
		assert!(store.contains("wave"));
		assert_eq!(store.toggle(&wave()).unwrap(), ToggleOutcome::Removed);
		assert!(!store.contains("wave"));
		assert!(store.is_empty());
	}

	#[test]
	fn rapid_toggles_never_duplicate() {
		let store = FavoritesStore::load(MemoryStorage::new());
		store.toggle(&dance()).unwrap();
		for i in 0..101 {
			let outcome = store.toggle(&wave()).unwrap();
			let expected = if i % 2 == 0 { ToggleOutcome::Added } else { ToggleOutcome::Removed };
			assert_eq!(outcome, expected);
			assert!(store.len() <= 2);
		}
		assert_eq!(store.list(), vec![dance(), wave()]);
	}

	#[test]
	fn toggles_from_many_threads_stay_consistent() {
		let store = FavoritesStore::load(MemoryStorage::new());
		std::thread::scope(|scope| {
			for _ in 0..8 {
				scope.spawn(|| {
					for _ in 0..50 {
						store.toggle(&wave()).unwrap();
					}
				});
			}
		});
		// 400 toggles, an even number
		assert!(store.is_empty());
	}

	#[test]
	fn every_toggle_is_written_through() {
		let storage = MemoryStorage::new();
		let store = FavoritesStore::load(&storage);
		store.toggle(&wave()).unwrap();
		assert_eq!(
			storage.get(FAVORITES_KEY).unwrap().as_deref(),
			Some(r#"[{"id":"wave","fileUrl":"https://cdn.example.org/wave.tgs"}]"#)
		);
		store.toggle(&wave()).unwrap();
		assert_eq!(storage.get(FAVORITES_KEY).unwrap().as_deref(), Some("[]"));
	}

	#[test]
	fn favorites_survive_reload() {
		let dir = tempfile::tempdir().unwrap();
		let store = FavoritesStore::load(FileStorage::new(dir.path()).unwrap());
		store.toggle(&wave()).unwrap();
		store.toggle(&dance()).unwrap();
		drop(store);

		let store = FavoritesStore::load(FileStorage::new(dir.path()).unwrap());
		assert_eq!(store.list(), vec![wave(), dance()]);
	}

	#[test]
	fn corrupt_record_is_empty() {
		let storage = MemoryStorage::new();
		storage.set(FAVORITES_KEY, "{not json").unwrap();
		let store = FavoritesStore::load(&storage);
		assert!(store.is_empty());
		store.toggle(&wave()).unwrap();
		assert_eq!(FavoritesStore::load(&storage).list(), vec![wave()]);
	}

	#[test]
	fn duplicates_in_record_are_dropped() {
		let storage = MemoryStorage::new();
		storage
			.set(
				FAVORITES_KEY,
				r#"[{"id":"wave","fileUrl":"a.tgs"},{"id":"wave","fileUrl":"b.tgs"}]"#
			)
			.unwrap();
		let store = FavoritesStore::load(&storage);
		assert_eq!(store.list(), vec![StickerReference::new("wave", "a.tgs")]);
	}

	struct ReadOnly(MemoryStorage);

	impl Storage for ReadOnly {
		fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
			self.0.get(key)
		}

		fn set(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
			bail!("storage is read only")
		}
	}

	#[test]
	fn failed_write_keeps_previous_state() {
		let storage = MemoryStorage::new();
		storage
			.set(FAVORITES_KEY, &serde_json::to_string(&vec![dance()]).unwrap())
			.unwrap();
		let store = FavoritesStore::load(ReadOnly(storage));

		assert!(matches!(store.toggle(&wave()), Err(Error::Storage(_))));
		assert_eq!(store.list(), vec![dance()]);
		assert!(matches!(store.toggle(&dance()), Err(Error::Storage(_))));
		assert_eq!(store.list(), vec![dance()]);
	}
}
