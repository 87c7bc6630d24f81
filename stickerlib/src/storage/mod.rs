mod memory;
pub mod simple_file;

pub use memory::MemoryStorage;
pub use simple_file::FileStorage;

/// Durable client-local key-value storage, holding one json document per key.
pub trait Storage: Send + Sync {
	/// `Ok(None)` if nothing was stored under `key` yet
	fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
	fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

impl<S> Storage for &S
where
	S: Storage + ?Sized
{
	fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
		(**self).get(key)
	}

	fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
		(**self).set(key, value)
	}
}
