use reqwest::StatusCode;
use std::{io, string::FromUtf8Error};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("request to {url:?} was not successful: {status}")]
pub struct StatusError {
	pub url: String,
	pub status: StatusCode
}

#[derive(Error, Debug)]
pub enum Error {
	#[error("failed to perform request: {0}")]
	Reqwest(#[from] reqwest::Error),
	/// the server answered, but not with 2xx
	#[error(transparent)]
	Status(#[from] StatusError),
	/// also covers truncated or corrupt gzip streams
	#[error(transparent)]
	IoError(#[from] io::Error),
	#[error("sticker is not valid utf-8: {0}")]
	Utf8(#[from] FromUtf8Error),
	#[error("failed to parse json: {0}")]
	Json(#[from] serde_json::Error),
	#[error("sticker does not describe a vector animation: {0}")]
	NotAnimation(String),
	#[error("no file found for {0:?}")]
	NotFound(String),
	/// to avoid that this enum is generic over the storage error use anyhow.
	/// This is the error created by the user choosen `Storage` impl.
	#[error("failed to access sticker storage: {0:?}")]
	Storage(anyhow::Error)
}
