//! Monotonic time sources for the limiter.
//!
//! [`SystemClock`] backs production limiters; [`ManualClock`] lets tests move time explicitly so
//! window arithmetic can be checked without sleeping.

// self
use crate::_prelude::*;

/// Source of monotonic instants.
pub trait Clock
where
	Self: Send + Sync + Debug,
{
	/// Returns the current instant; successive calls never go backwards.
	fn now(&self) -> Instant;
}

/// Clock backed by [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> Instant {
		Instant::now()
	}
}

/// Controllable clock; clones share the same instant.
#[derive(Clone, Debug)]
pub struct ManualClock(Arc<Mutex<Instant>>);
impl ManualClock {
	/// Creates a clock frozen at `start`.
	pub fn new(start: Instant) -> Self {
		Self(Arc::new(Mutex::new(start)))
	}

	/// Moves the clock forward by `by`.
	pub fn advance(&self, by: Duration) {
		*self.0.lock() += by;
	}

	/// Pins the clock to `instant`. Moving backwards is ignored to keep the clock monotonic.
	pub fn set(&self, instant: Instant) {
		let mut current = self.0.lock();

		if instant > *current {
			*current = instant;
		}
	}
}
impl Clock for ManualClock {
	fn now(&self) -> Instant {
		*self.0.lock()
	}
}
