use crate::{
	error::{Error, StatusError},
	get_client
};
use async_trait::async_trait;
use std::{
	collections::HashMap,
	sync::{Mutex, PoisonError}
};

/// Source of raw sticker files.
#[async_trait]
pub trait Fetcher: Send + Sync {
	async fn fetch(&self, url: &str) -> Result<Vec<u8>, Error>;
}

/// Download files with the shared http client, see [`crate::set_client`].
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpFetcher;

#[async_trait]
impl Fetcher for HttpFetcher {
	async fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
		let response = get_client().get(url).send().await?;
		let status = response.status();
		if !status.is_success() {
			return Err(StatusError {
				url: url.to_owned(),
				status
			}
			.into());
		}
		Ok(response.bytes().await?.to_vec())
	}
}

/// Files kept in memory, keyed by url. Unknown urls fail with [`Error::NotFound`].
#[derive(Debug, Default)]
pub struct MemoryFetcher {
	files: Mutex<HashMap<String, Vec<u8>>>
}

impl MemoryFetcher {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert<U>(&self, url: U, data: Vec<u8>)
	where
		U: Into<String>
	{
		self.files
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(url.into(), data);
	}
}

#[async_trait]
impl Fetcher for MemoryFetcher {
	async fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
		self.files
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.get(url)
			.cloned()
			.ok_or_else(|| Error::NotFound(url.to_owned()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn memory_fetcher_returns_inserted_files() {
		let fetcher = MemoryFetcher::new();
		fetcher.insert("a.tgs", vec![1, 2, 3]);
		assert_eq!(fetcher.fetch("a.tgs").await.unwrap(), vec![1, 2, 3]);
		assert!(matches!(fetcher.fetch("b.tgs").await, Err(Error::NotFound(url)) if url == "b.tgs"));
	}
}
