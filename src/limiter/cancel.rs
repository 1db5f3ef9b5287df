//! Cooperative cancellation for blocked admission waits.

// std
use std::sync::{
	Weak,
	atomic::{AtomicBool, Ordering},
};
// self
use crate::_prelude::*;

/// Something that must be woken when a token it waits on is cancelled.
pub(crate) trait CancelListener
where
	Self: Send + Sync,
{
	/// Wakes every thread currently blocked in the listener.
	fn on_cancel(&self);
}

#[derive(Default)]
struct CancelState {
	cancelled: AtomicBool,
	listeners: Mutex<Vec<Weak<dyn CancelListener>>>,
}

/// Cloneable cancellation signal passed into
/// [`RateLimiter::acquire`](crate::limiter::RateLimiter::acquire).
///
/// Clones share state: cancelling any clone cancels them all and wakes every limiter currently
/// blocked on the token. Cancellation is permanent.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<CancelState>);
impl CancellationToken {
	/// Creates a fresh, uncancelled token.
	pub fn new() -> Self {
		Self::default()
	}

	/// Token for callers that never cancel.
	pub fn never() -> Self {
		Self::default()
	}

	/// Cancels the token and wakes any waits observing it.
	pub fn cancel(&self) {
		if self.0.cancelled.swap(true, Ordering::SeqCst) {
			return;
		}

		let listeners = std::mem::take(&mut *self.0.listeners.lock());

		for listener in listeners.iter().filter_map(Weak::upgrade) {
			listener.on_cancel();
		}
	}

	/// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
	pub fn is_cancelled(&self) -> bool {
		self.0.cancelled.load(Ordering::SeqCst)
	}

	/// Registers `listener` so a later [`cancel`](Self::cancel) wakes it.
	///
	/// Must be called before the listener re-checks [`is_cancelled`](Self::is_cancelled) under
	/// its own lock, otherwise a concurrent cancel could be missed.
	pub(crate) fn register(&self, listener: &Arc<dyn CancelListener>) {
		let mut listeners = self.0.listeners.lock();

		listeners.retain(|weak| weak.strong_count() > 0);

		let weak = Arc::downgrade(listener);

		if !listeners.iter().any(|known| Weak::ptr_eq(known, &weak)) {
			listeners.push(weak);
		}
	}
}
impl Debug for CancellationToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CancellationToken").field("cancelled", &self.is_cancelled()).finish()
	}
}
