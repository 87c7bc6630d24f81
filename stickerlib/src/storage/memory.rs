use super::Storage;
use std::{
	collections::BTreeMap,
	sync::{PoisonError, RwLock}
};

/// Storage which only lives as long as the value, used at tests
/// and by hosts without a writable data directory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
	tree: RwLock<BTreeMap<String, String>>
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}
}

impl Storage for MemoryStorage {
	fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
		let lock = self.tree.read().unwrap_or_else(PoisonError::into_inner);
		Ok(lock.get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
		let mut lock = self.tree.write().unwrap_or_else(PoisonError::into_inner);
		lock.insert(key.to_owned(), value.to_owned());
		Ok(())
	}
}
