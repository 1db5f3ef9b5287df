//! Admission control for outbound registration calls.
//!
//! [`SlidingWindowLimiter`] admits at most `limit` callers in any trailing interval of length
//! `window`. Callers over budget block on a condition variable until the oldest admission ages
//! out; the wait can be aborted through a [`CancellationToken`].
//!
//! # Fairness
//!
//! Admission order is relaxed: when a slot frees up, whichever waiter re-acquires the internal
//! lock first takes it. Every waiter recomputes its deadline against the then-oldest entry, so
//! under bounded load each caller is eventually admitted, but not necessarily in call order.

pub mod cancel;
pub mod sliding_window;

pub use cancel::*;
pub use sliding_window::*;

// self
use crate::_prelude::*;

/// Contract for admission gates that sit in front of the registration API.
pub trait RateLimiter
where
	Self: Send + Sync + Debug,
{
	/// Blocks until one admission slot is reserved and returns the recorded admission instant.
	///
	/// Returns [`Error::Cancelled`] without recording anything if `cancel` fires first.
	fn acquire(&self, cancel: &CancellationToken) -> Result<Instant>;
}

/// Window length expressed as one unit of time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeUnit {
	/// One millisecond.
	Milliseconds,
	/// One second.
	Seconds,
	/// One minute.
	Minutes,
	/// One hour.
	Hours,
	/// One day.
	Days,
}
impl TimeUnit {
	/// Returns the duration of a single unit.
	pub const fn as_duration(self) -> Duration {
		match self {
			TimeUnit::Milliseconds => Duration::from_millis(1),
			TimeUnit::Seconds => Duration::from_secs(1),
			TimeUnit::Minutes => Duration::from_secs(60),
			TimeUnit::Hours => Duration::from_secs(60 * 60),
			TimeUnit::Days => Duration::from_secs(24 * 60 * 60),
		}
	}
}
impl From<TimeUnit> for Duration {
	fn from(unit: TimeUnit) -> Self {
		unit.as_duration()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn time_units_cover_one_unit_each() {
		assert_eq!(TimeUnit::Milliseconds.as_duration(), Duration::from_millis(1));
		assert_eq!(Duration::from(TimeUnit::Minutes), Duration::from_secs(60));
		assert_eq!(TimeUnit::Days.as_duration(), Duration::from_secs(86_400));
	}
}
