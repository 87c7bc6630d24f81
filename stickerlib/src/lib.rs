#![allow(clippy::tabs_in_doc_comments)]
#![warn(unreachable_pub)]
#![cfg_attr(all(doc, nightly), feature(doc_auto_cfg))]

//! Engine behind the chat sticker panel.
//!
//! A [`Sticker`](sticker::Sticker) enters the crate through a
//! [`StickerPack`](catalog::StickerPack) and is classified once by its file suffix.
//! [`Player`](player::Player) then picks the matching renderer: the gzip compressed
//! vector animation pipeline ([`player::tgs`]) or the muted looping video adapter
//! ([`player::video`]). The [`panel`] module puts the gesture state machine,
//! favorites and toasts on top of that.

pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod fetch;
pub mod gesture;
pub mod panel;
pub mod player;
pub mod sticker;
pub mod storage;
pub mod toast;

pub use error::Error;

use once_cell::sync::OnceCell;

static CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

/// Use `client` for every request made by this crate.
///
/// Must be called before the first request; afterwards the client is fixed and
/// the rejected client is handed back.
pub fn set_client(client: reqwest::Client) -> Result<(), reqwest::Client> {
	CLIENT.set(client)
}

/// The shared HTTP client, created with default settings on first use.
pub fn get_client() -> &'static reqwest::Client {
	CLIENT.get_or_init(reqwest::Client::new)
}
