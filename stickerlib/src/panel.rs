//! Sticker panel: the grid of sticker tiles of the chat composer.
//!
//! The panel is the only place where the pieces meet. It loads packs from the
//! [`PackCatalog`], routes pointer events to the [`TileGesture`] of the touched
//! tile, keeps the single [`Selection`], and turns gesture outcomes into
//! [`PanelEvent`]s for the chat composer and the panel chrome.

use crate::{
	catalog::{PackCatalog, StickerPack},
	config::Config,
	favorites::FavoritesStore,
	gesture::{GestureOutcome, PointerKind, Selection, TileGesture, HAPTIC_PULSE},
	sticker::{Sticker, StickerReference},
	storage::Storage,
	toast::{Toast, ToastSlot}
};
use log::{debug, error, warn};
use std::{
	collections::HashMap,
	sync::Arc,
	time::{Duration, Instant}
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Tab {
	/// stickers of the pack at this index
	Stickers(usize),
	Favorites,
	Emoji,
	Gif
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum CatalogState {
	#[default]
	NotLoaded,
	Loaded(Vec<StickerPack>),
	/// show a retry button instead of the grid
	Failed(String)
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PanelEvent {
	/// append a sticker message with this file url to the chat
	SendSticker(String),
	Toast(Toast),
	/// vibrate for this long, if the device can
	Haptic(Duration)
}

pub struct StickerPanel<C, S>
where
	C: PackCatalog,
	S: Storage
{
	catalog: C,
	favorites: Arc<FavoritesStore<S>>,
	config: Config,
	catalog_state: CatalogState,
	tab: Tab,
	selection: Selection,
	gestures: HashMap<String, TileGesture>,
	/// tile holding the running press
	pressed: Option<String>,
	toasts: ToastSlot,
	open: bool
}

impl<C, S> StickerPanel<C, S>
where
	C: PackCatalog,
	S: Storage
{
	pub fn new(catalog: C, favorites: Arc<FavoritesStore<S>>, config: Config) -> Self {
		Self {
			catalog,
			favorites,
			config,
			catalog_state: CatalogState::NotLoaded,
			tab: Tab::Stickers(0),
			selection: Selection::default(),
			gestures: HashMap::new(),
			pressed: None,
			toasts: ToastSlot::default(),
			open: false
		}
	}

	/// Show the panel and fetch the packs for this session.
	pub async fn open(&mut self) {
		self.reset_interaction();
		self.open = true;
		self.load_packs().await;
	}

	/// Fetch the packs again after a failure.
	pub async fn retry(&mut self) {
		if let CatalogState::Failed(_) = self.catalog_state {
			self.load_packs().await;
		}
	}

	pub fn close(&mut self) {
		self.reset_interaction();
		self.open = false;
	}

	async fn load_packs(&mut self) {
		self.catalog_state = match self.catalog.fetch_packs().await {
			Ok(packs) => {
				if let Tab::Stickers(index) = self.tab {
					if index >= packs.len() {
						self.tab = Tab::Stickers(0);
					}
				}
				CatalogState::Loaded(packs)
			},
			Err(err) => {
				warn!("failed to load sticker packs: {err}");
				CatalogState::Failed(err.to_string())
			}
		};
	}

	pub fn is_open(&self) -> bool {
		self.open
	}

	pub fn catalog_state(&self) -> &CatalogState {
		&self.catalog_state
	}

	pub fn packs(&self) -> &[StickerPack] {
		match &self.catalog_state {
			CatalogState::Loaded(packs) => packs,
			_ => &[]
		}
	}

	pub fn favorites(&self) -> &FavoritesStore<S> {
		&self.favorites
	}

	pub fn tab(&self) -> Tab {
		self.tab
	}

	/// Switch the tab. Always clears the selection, so a sticker of a pack that is
	/// no longer visible can not be sent.
	pub fn select_tab(&mut self, tab: Tab) {
		self.tab = tab;
		self.reset_interaction();
	}

	pub fn select_pack(&mut self, index: usize) {
		self.select_tab(Tab::Stickers(index));
	}

	pub fn selected(&self) -> Option<&str> {
		self.selection.selected()
	}

	/// Stickers of the grid at the active tab.
	pub fn visible_stickers(&self) -> Vec<Sticker> {
		match self.tab {
			Tab::Stickers(index) => self
				.packs()
				.get(index)
				.map(|pack| pack.stickers.clone())
				.unwrap_or_default(),
			Tab::Favorites => self.favorites.list().into_iter().map(Sticker::from).collect(),
			Tab::Emoji | Tab::Gif => Vec::new()
		}
	}

	fn visible_reference(&self, id: &str) -> Option<StickerReference> {
		match self.tab {
			Tab::Stickers(index) => self
				.packs()
				.get(index)?
				.sticker(id)
				.map(|sticker| sticker.reference().clone()),
			Tab::Favorites => self.favorites.list().into_iter().find(|favorite| favorite.id == id),
			Tab::Emoji | Tab::Gif => None
		}
	}

	pub fn pointer_down(&mut self, id: &str, kind: PointerKind, now: Instant) {
		if self.visible_reference(id).is_none() {
			debug!("ignore press on unknown sticker {id:?}");
			return;
		}
		if let Some(previous) = self.pressed.take() {
			if let Some(gesture) = self.gestures.get_mut(&previous) {
				gesture.reset();
			}
		}
		let config = self.config.long_press;
		self.gestures
			.entry(id.to_owned())
			.or_insert_with(|| TileGesture::new(config))
			.press_start(now, kind);
		self.pressed = Some(id.to_owned());
	}

	/// The pointer left the tile `id` while pressed.
	pub fn pointer_move_out(&mut self, id: &str) {
		if self.pressed.as_deref() == Some(id) {
			self.cancel_press();
		}
	}

	/// The grid scrolled.
	pub fn scroll(&mut self) {
		self.cancel_press();
	}

	fn cancel_press(&mut self) {
		if let Some(gesture) = self.pressed.as_ref().and_then(|id| self.gestures.get_mut(id)) {
			gesture.press_cancel();
		}
	}

	/// Drive the long press timer.
	pub fn tick(&mut self, now: Instant) -> Vec<PanelEvent> {
		let Some(id) = self.pressed.clone() else {
			return Vec::new();
		};
		let outcome = match self.gestures.get_mut(&id) {
			Some(gesture) => gesture.poll(now),
			None => return Vec::new()
		};
		self.apply(outcome, &id, now)
	}

	/// The pointer went up over tile `id`, which might not be the pressed one.
	pub fn pointer_up(&mut self, id: &str, now: Instant) -> Vec<PanelEvent> {
		let Some(pressed) = self.pressed.take() else {
			return Vec::new();
		};
		let Some(sticker) = self.visible_reference(&pressed) else {
			return Vec::new();
		};
		let outcome = match self.gestures.get_mut(&pressed) {
			Some(gesture) => gesture.press_end(now, pressed == id, &sticker, &mut self.selection),
			None => GestureOutcome::Nothing
		};
		self.apply(outcome, &pressed, now)
	}

	/// Returns true if the host has to suppress the context menu of tile `id`.
	pub fn context_menu(&self, id: &str) -> bool {
		self.gestures.get(id).map(TileGesture::context_menu).unwrap_or(true)
	}

	/// The favorites toast visible at `now`.
	pub fn toast(&mut self, now: Instant) -> Option<&Toast> {
		self.toasts.current(now)
	}

	fn apply(&mut self, outcome: GestureOutcome, id: &str, now: Instant) -> Vec<PanelEvent> {
		match outcome {
			GestureOutcome::Nothing | GestureOutcome::Selected => Vec::new(),
			GestureOutcome::Send(file_url) => vec![PanelEvent::SendSticker(file_url)],
			GestureOutcome::LongPress => {
				let mut events = vec![PanelEvent::Haptic(HAPTIC_PULSE)];
				let Some(sticker) = self.visible_reference(id) else {
					return events;
				};
				match self.favorites.toggle(&sticker) {
					Ok(outcome) => {
						let toast = Toast::favorite(outcome, now, self.config.toast_duration());
						self.toasts.show(toast.clone());
						events.push(PanelEvent::Toast(toast));
					},
					Err(err) => error!("failed to update favorites: {err}")
				}
				if let Some(selected) = self.selection.selected() {
					if self.visible_reference(selected).is_none() {
						self.selection.clear();
					}
				}
				events
			}
		}
	}

	fn reset_interaction(&mut self) {
		self.selection.clear();
		self.gestures.clear();
		self.pressed = None;
	}
}
