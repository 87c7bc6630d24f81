//! Tell taps, long presses and scrolls on a sticker tile apart.
//!
//! One press-to-release sequence on a tile ends as exactly one of
//!
//! * a **tap**: released before the long press threshold without leaving the tile.
//!   The first tap selects the sticker, a second tap on the selected sticker sends it.
//! * a **long press**: held past the threshold. The caller toggles the favorite;
//!   the following release is part of the long press and does nothing.
//! * **cancelled**: the pointer left the tile or the grid scrolled.
//!
//! The host owns the clock and drives the timer by calling [`TileGesture::poll`].

use crate::sticker::StickerReference;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// long press threshold for touch surfaces
pub const TOUCH_LONG_PRESS: Duration = Duration::from_millis(500);
/// long press threshold for mouse and pen
pub const MOUSE_LONG_PRESS: Duration = Duration::from_millis(800);
/// length of the vibration after a long press, where supported
pub const HAPTIC_PULSE: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
	Touch,
	Mouse
}

/// Long press thresholds per pointer kind.
///
/// The defaults differ: 500ms on touch surfaces, 800ms for the mouse.
/// Use [`LongPressConfig::uniform`] for one threshold everywhere.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(from = "LongPressMillis")]
pub struct LongPressConfig {
	pub touch: Duration,
	pub mouse: Duration
}

impl LongPressConfig {
	pub fn uniform(threshold: Duration) -> Self {
		Self {
			touch: threshold,
			mouse: threshold
		}
	}

	pub fn threshold(&self, kind: PointerKind) -> Duration {
		match kind {
			PointerKind::Touch => self.touch,
			PointerKind::Mouse => self.mouse
		}
	}
}

impl Default for LongPressConfig {
	fn default() -> Self {
		Self {
			touch: TOUCH_LONG_PRESS,
			mouse: MOUSE_LONG_PRESS
		}
	}
}

#[derive(Deserialize)]
#[serde(default)]
struct LongPressMillis {
	touch_ms: u64,
	mouse_ms: u64
}

impl Default for LongPressMillis {
	fn default() -> Self {
		let LongPressConfig { touch, mouse } = LongPressConfig::default();
		Self {
			touch_ms: touch.as_millis() as u64,
			mouse_ms: mouse.as_millis() as u64
		}
	}
}

impl From<LongPressMillis> for LongPressConfig {
	fn from(value: LongPressMillis) -> Self {
		Self {
			touch: Duration::from_millis(value.touch_ms),
			mouse: Duration::from_millis(value.mouse_ms)
		}
	}
}

/// The sticker selected at a panel, waiting for the confirming second tap.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Selection {
	selected: Option<String>
}

impl Selection {
	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	pub fn is_selected(&self, id: &str) -> bool {
		self.selected.as_deref() == Some(id)
	}

	pub fn select<I>(&mut self, id: I)
	where
		I: Into<String>
	{
		self.selected = Some(id.into());
	}

	pub fn clear(&mut self) {
		self.selected = None;
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GestureState {
	Idle,
	/// pressed and still a valid tap or long press
	Pressed { deadline: Instant },
	LongPressFired,
	Cancelled
}

/// What a transition asks the panel to do.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GestureOutcome {
	Nothing,
	/// first tap: the sticker is selected now
	Selected,
	/// second tap: send the sticker with this file url; the selection is cleared
	Send(String),
	/// toggle the favorite and give haptic feedback
	LongPress
}

/// Gesture state of one sticker tile.
#[derive(Clone, Debug)]
pub struct TileGesture {
	config: LongPressConfig,
	state: GestureState
}

impl TileGesture {
	pub fn new(config: LongPressConfig) -> Self {
		Self {
			config,
			state: GestureState::Idle
		}
	}

	pub fn state(&self) -> GestureState {
		self.state
	}

	/// Pointer went down on the tile; starts the long press timer.
	pub fn press_start(&mut self, now: Instant, kind: PointerKind) {
		self.state = GestureState::Pressed {
			deadline: now + self.config.threshold(kind)
		};
	}

	/// Check the long press timer. Fires at most once per press.
	pub fn poll(&mut self, now: Instant) -> GestureOutcome {
		match self.state {
			GestureState::Pressed { deadline } if now >= deadline => {
				self.state = GestureState::LongPressFired;
				GestureOutcome::LongPress
			},
			_ => GestureOutcome::Nothing
		}
	}

	/// The pointer left the tile or the grid scrolled. Stops the timer,
	/// the release will do nothing.
	pub fn press_cancel(&mut self) {
		if let GestureState::Pressed { .. } = self.state {
			self.state = GestureState::Cancelled;
		}
	}

	/// Pointer went up. `on_tile` is false if it was released over another element.
	///
	/// A release after the threshold counts as long press, even if the timer was
	/// not polled in between.
	pub fn press_end(
		&mut self,
		now: Instant,
		on_tile: bool,
		sticker: &StickerReference,
		selection: &mut Selection
	) -> GestureOutcome {
		let state = std::mem::replace(&mut self.state, GestureState::Idle);
		match state {
			GestureState::Pressed { .. } if !on_tile => GestureOutcome::Nothing,
			GestureState::Pressed { deadline } if now >= deadline => GestureOutcome::LongPress,
			GestureState::Pressed { .. } => {
				if selection.is_selected(&sticker.id) {
					selection.clear();
					GestureOutcome::Send(sticker.file_url.clone())
				} else {
					selection.select(sticker.id.clone());
					GestureOutcome::Selected
				}
			},
			GestureState::Idle | GestureState::LongPressFired | GestureState::Cancelled => GestureOutcome::Nothing
		}
	}

	/// A context menu was requested on the tile. The caller must suppress it;
	/// the running gesture is not affected.
	pub fn context_menu(&self) -> bool {
		true
	}

	pub fn reset(&mut self) {
		self.state = GestureState::Idle;
	}
}

impl Default for TileGesture {
	fn default() -> Self {
		Self::new(LongPressConfig::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn wave() -> StickerReference {
		StickerReference::new("wave", "https://cdn.example.org/wave.tgs")
	}

	fn ms(ms: u64) -> Duration {
		Duration::from_millis(ms)
	}

	#[test]
	fn short_press_selects() {
		let start = Instant::now();
		let mut selection = Selection::default();
		let mut gesture = TileGesture::default();

		gesture.press_start(start, PointerKind::Touch);
		assert_eq!(gesture.poll(start + ms(200)), GestureOutcome::Nothing);
		let outcome = gesture.press_end(start + ms(300), true, &wave(), &mut selection);
		assert_eq!(outcome, GestureOutcome::Selected);
		assert_eq!(selection.selected(), Some("wave"));
		assert_eq!(gesture.state(), GestureState::Idle);
	}

	#[test]
	fn second_tap_sends_and_clears() {
		let start = Instant::now();
		let mut selection = Selection::default();
		let mut gesture = TileGesture::default();

		gesture.press_start(start, PointerKind::Touch);
		gesture.press_end(start + ms(100), true, &wave(), &mut selection);
		gesture.press_start(start + ms(400), PointerKind::Touch);
		let outcome = gesture.press_end(start + ms(500), true, &wave(), &mut selection);
		assert_eq!(outcome, GestureOutcome::Send("https://cdn.example.org/wave.tgs".to_owned()));
		assert_eq!(selection.selected(), None);
	}

	#[test]
	fn long_press_fires_once_and_consumes_release() {
		let start = Instant::now();
		let mut selection = Selection::default();
		let mut gesture = TileGesture::default();

		gesture.press_start(start, PointerKind::Touch);
		assert_eq!(gesture.poll(start + ms(499)), GestureOutcome::Nothing);
		assert_eq!(gesture.poll(start + ms(500)), GestureOutcome::LongPress);
		assert_eq!(gesture.poll(start + ms(900)), GestureOutcome::Nothing);
		let outcome = gesture.press_end(start + ms(1000), true, &wave(), &mut selection);
		assert_eq!(outcome, GestureOutcome::Nothing);
		assert_eq!(selection.selected(), None);
	}

	#[test]
	fn long_press_does_not_send_selected_sticker() {
		let start = Instant::now();
		let mut selection = Selection::default();
		selection.select("wave");
		let mut gesture = TileGesture::default();

		gesture.press_start(start, PointerKind::Mouse);
		assert_eq!(gesture.poll(start + ms(800)), GestureOutcome::LongPress);
		gesture.press_end(start + ms(900), true, &wave(), &mut selection);
		assert_eq!(selection.selected(), Some("wave"));
	}

	#[test]
	fn late_release_without_poll_is_long_press() {
		let start = Instant::now();
		let mut selection = Selection::default();
		let mut gesture = TileGesture::default();

		gesture.press_start(start, PointerKind::Touch);
		let outcome = gesture.press_end(start + ms(700), true, &wave(), &mut selection);
		assert_eq!(outcome, GestureOutcome::LongPress);
		assert_eq!(selection.selected(), None);
	}

	#[test]
	fn mouse_threshold_is_longer() {
		let start = Instant::now();
		let mut gesture = TileGesture::default();

		gesture.press_start(start, PointerKind::Mouse);
		assert_eq!(gesture.poll(start + ms(600)), GestureOutcome::Nothing);
		assert_eq!(gesture.poll(start + ms(800)), GestureOutcome::LongPress);
	}

	#[test]
	fn uniform_threshold() {
		let config = LongPressConfig::uniform(ms(650));
		assert_eq!(config.threshold(PointerKind::Touch), ms(650));
		assert_eq!(config.threshold(PointerKind::Mouse), ms(650));
	}

	#[test]
	fn scroll_cancels_everything() {
		let start = Instant::now();
		let mut selection = Selection::default();
		let mut gesture = TileGesture::default();

		gesture.press_start(start, PointerKind::Touch);
		gesture.press_cancel();
		assert_eq!(gesture.poll(start + ms(2000)), GestureOutcome::Nothing);
		let outcome = gesture.press_end(start + ms(2100), true, &wave(), &mut selection);
		assert_eq!(outcome, GestureOutcome::Nothing);
		assert_eq!(selection.selected(), None);
	}

	#[test]
	fn release_elsewhere_is_not_a_tap() {
		let start = Instant::now();
		let mut selection = Selection::default();
		let mut gesture = TileGesture::default();

		gesture.press_start(start, PointerKind::Mouse);
		let outcome = gesture.press_end(start + ms(100), false, &wave(), &mut selection);
		assert_eq!(outcome, GestureOutcome::Nothing);
		assert_eq!(selection.selected(), None);
	}

	#[test]
	fn release_without_press_does_nothing() {
		let mut selection = Selection::default();
		let mut gesture = TileGesture::default();
		let outcome = gesture.press_end(Instant::now(), true, &wave(), &mut selection);
		assert_eq!(outcome, GestureOutcome::Nothing);
	}

	#[test]
	fn context_menu_is_suppressed_without_breaking_the_press() {
		let start = Instant::now();
		let mut selection = Selection::default();
		let mut gesture = TileGesture::default();

		gesture.press_start(start, PointerKind::Touch);
		assert!(gesture.context_menu());
		assert_eq!(gesture.poll(start + ms(500)), GestureOutcome::LongPress);
		assert_eq!(
			gesture.press_end(start + ms(600), true, &wave(), &mut selection),
			GestureOutcome::Nothing
		);
	}

	#[test]
	fn thresholds_from_config() {
		let config: LongPressConfig = serde_json::from_str(r#"{"touch_ms": 300}"#).unwrap();
		assert_eq!(config.touch, ms(300));
		assert_eq!(config.mouse, MOUSE_LONG_PRESS);
	}
}
