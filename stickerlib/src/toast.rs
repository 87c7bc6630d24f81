use crate::favorites::ToggleOutcome;
use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(2);

/// Short lived confirmation shown by the panel chrome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Toast {
	pub outcome: ToggleOutcome,
	pub message: String,
	pub expires_at: Instant
}

impl Toast {
	pub fn favorite(outcome: ToggleOutcome, now: Instant, duration: Duration) -> Self {
		let message = match outcome {
			ToggleOutcome::Added => "Added to favorites",
			ToggleOutcome::Removed => "Removed from favorites"
		};
		Self {
			outcome,
			message: message.to_owned(),
			expires_at: now + duration
		}
	}

	pub fn is_expired(&self, now: Instant) -> bool {
		now >= self.expires_at
	}
}

/// Holds the toast currently on screen; a new toast replaces the old one.
#[derive(Debug, Default)]
pub struct ToastSlot {
	current: Option<Toast>
}

impl ToastSlot {
	pub fn show(&mut self, toast: Toast) {
		self.current = Some(toast);
	}

	/// The visible toast at `now`, dismissing it once expired.
	pub fn current(&mut self, now: Instant) -> Option<&Toast> {
		if self.current.as_ref().is_some_and(|toast| toast.is_expired(now)) {
			self.current = None;
		}
		self.current.as_ref()
	}

	pub fn dismiss(&mut self) {
		self.current = None;
	}
}
