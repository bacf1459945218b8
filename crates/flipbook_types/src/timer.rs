//! Timer services.
//!
//! Animations never own a timer. Whoever drives them arms a one-shot event through a
//! [`Scheduler`], calls the tick function when it fires and re-arms it with the delay the
//! tick reports. The [`Cookie`] passed along lets a single timer callback serve several
//! animations.

use std::collections::BTreeMap;

/// Correlation token delivered back with a fired timer event.
pub type Cookie = u32;

/// Handle of an armed timer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
	/// Returns the raw handle value.
	pub fn raw(self) -> u64 {
		self.0
	}
}

/// One-shot timer service.
pub trait Scheduler {
	/// Arms an event that fires once after `delay_ms` milliseconds.
	fn send_event(&mut self, delay_ms: u32, cookie: Cookie) -> TimerHandle;

	/// Disarms a pending event. Returns `false` if it already fired or never existed.
	fn cancel_event(&mut self, handle: TimerHandle) -> bool;
}

/// Deterministic [`Scheduler`] running on a virtual millisecond clock.
///
/// Time only moves when [`advance`](Self::advance) is called, which makes tick sequences
/// reproducible in tests. Real-time drivers can sleep until
/// [`next_deadline`](Self::next_deadline) and advance by the time actually elapsed.
///
/// # Examples
///
/// ```
/// use flipbook_types::timer::{ManualScheduler, Scheduler};
///
/// let mut timers = ManualScheduler::new();
/// let handle = timers.send_event(100, 1);
///
/// assert!(timers.advance(99).is_empty());
/// assert_eq!(timers.advance(1), vec![(handle, 1)]);
/// assert!(!timers.cancel_event(handle));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
	now_ms: u64,
	next_id: u64,
	// keyed by (deadline, handle) so ties fire in arming order
	pending: BTreeMap<(u64, TimerHandle), Cookie>,
}

impl ManualScheduler {
	/// Creates a scheduler at time zero with nothing armed.
	pub fn new() -> Self {
		Self::default()
	}

	/// Current virtual time in milliseconds.
	pub fn now_ms(&self) -> u64 {
		self.now_ms
	}

	/// Number of armed events.
	pub fn pending(&self) -> usize {
		self.pending.len()
	}

	/// Returns `true` if `handle` is armed.
	pub fn is_pending(&self, handle: TimerHandle) -> bool {
		self.pending.keys().any(|(_, h)| *h == handle)
	}

	/// Absolute time of the earliest armed event.
	pub fn next_deadline(&self) -> Option<u64> {
		self.pending.keys().next().map(|(deadline, _)| *deadline)
	}

	/// Moves the clock forward and returns every event that became due, earliest first.
	///
	/// Fired events are removed; events armed by the caller while handling them are not
	/// part of the returned batch even if their deadline has already passed.
	pub fn advance(&mut self, ms: u64) -> Vec<(TimerHandle, Cookie)> {
		self.now_ms += ms;
		let mut fired = Vec::new();
		while let Some(entry) = self.pending.first_entry() {
			if entry.key().0 > self.now_ms {
				break;
			}
			let ((_, handle), cookie) = entry.remove_entry();
			fired.push((handle, cookie));
		}
		fired
	}

	/// Advances straight to the next deadline and returns what fired there.
	pub fn advance_to_next(&mut self) -> Vec<(TimerHandle, Cookie)> {
		match self.next_deadline() {
			Some(deadline) => self.advance(deadline.saturating_sub(self.now_ms)),
			None => Vec::new(),
		}
	}
}

impl Scheduler for ManualScheduler {
	fn send_event(&mut self, delay_ms: u32, cookie: Cookie) -> TimerHandle {
		let handle = TimerHandle(self.next_id);
		self.next_id += 1;
		self.pending.insert((self.now_ms + u64::from(delay_ms), handle), cookie);
		handle
	}

	fn cancel_event(&mut self, handle: TimerHandle) -> bool {
		let key = self.pending.keys().find(|(_, h)| *h == handle).copied();
		key.and_then(|key| self.pending.remove(&key)).is_some()
	}
}
