//! Sliding-window limiter backed by a timestamp deque and a condition variable.

// self
use crate::{
	_prelude::*,
	clock::{Clock, SystemClock},
	error::ArgumentError,
	limiter::{
		RateLimiter, TimeUnit,
		cancel::{CancelListener, CancellationToken},
	},
	obs,
};

/// Shared wait state: admission history (oldest first) plus the condition waiters park on.
struct Gate {
	history: Mutex<VecDeque<Instant>>,
	released: Condvar,
}
impl CancelListener for Gate {
	fn on_cancel(&self) {
		// Taking the lock orders this wake after any waiter that already checked the token.
		let _history = self.history.lock();

		self.released.notify_all();
	}
}

/// Admits at most `limit` callers within any trailing `window`.
///
/// Entries are appended at admission time and trimmed lazily from the front once
/// `now - entry >= window`, so the counted interval is `(now - window, now]`.
pub struct SlidingWindowLimiter {
	window: Duration,
	limit: usize,
	clock: Arc<dyn Clock>,
	gate: Arc<Gate>,
}
impl SlidingWindowLimiter {
	/// Shortest interval a blocked caller sleeps before re-checking.
	pub const MIN_WAIT: Duration = Duration::from_millis(1);

	/// Creates a limiter driven by the [`SystemClock`].
	pub fn new(window: Duration, limit: usize) -> Result<Self> {
		Self::with_clock(window, limit, Arc::new(SystemClock))
	}

	/// Creates a limiter whose window is a single `unit` of time.
	pub fn per_unit(unit: TimeUnit, limit: usize) -> Result<Self> {
		Self::new(unit.as_duration(), limit)
	}

	/// Creates a limiter that reads time from `clock`.
	pub fn with_clock(window: Duration, limit: usize, clock: Arc<dyn Clock>) -> Result<Self> {
		if window.is_zero() {
			return Err(ArgumentError::ZeroWindow.into());
		}
		if limit == 0 {
			return Err(ArgumentError::ZeroLimit.into());
		}

		let gate =
			Gate { history: Mutex::new(VecDeque::with_capacity(limit)), released: Condvar::new() };

		Ok(Self { window, limit, clock, gate: Arc::new(gate) })
	}

	/// Length of the sliding window.
	pub fn window(&self) -> Duration {
		self.window
	}

	/// Maximum admissions per window.
	pub fn limit(&self) -> usize {
		self.limit
	}

	/// Number of admissions still inside the window at the current instant.
	pub fn admitted_in_window(&self) -> usize {
		let mut history = self.gate.history.lock();

		self.trim(&mut history, self.clock.now());

		history.len()
	}

	/// Reserves a slot without blocking.
	///
	/// Returns the admission instant, or the time left until the oldest entry expires. A
	/// rejected call leaves the history untouched.
	pub fn try_acquire(&self) -> Result<Instant, Duration> {
		let mut history = self.gate.history.lock();

		match self.admit(&mut history) {
			Ok(now) => {
				drop(history);
				self.gate.released.notify_all();

				Ok(now)
			},
			Err(wait) => Err(wait.max(Self::MIN_WAIT)),
		}
	}

	/// Blocks until a slot is reserved, or until `cancel` fires.
	///
	/// The clock is read under the lock, so history order always matches admission order. Waking
	/// up never admits on its own: every pass re-trims and re-tests before recording. A window too
	/// long to add to the oldest admission parks the caller until a release or `cancel`.
	pub fn acquire(&self, cancel: &CancellationToken) -> Result<Instant> {
		let listener: Arc<dyn CancelListener> = self.gate.clone();

		cancel.register(&listener);

		let mut history = self.gate.history.lock();
		let mut waited_since = None;

		loop {
			if cancel.is_cancelled() {
				obs::limiter_cancelled(self.limit);

				return Err(Error::Cancelled);
			}

			let wait = match self.admit(&mut history) {
				Ok(now) => {
					drop(history);
					self.gate.released.notify_all();

					if let Some(since) = waited_since {
						obs::record_limiter_wait(now.saturating_duration_since(since));
					}

					obs::limiter_admitted(self.limit);

					return Ok(now);
				},
				Err(wait) => wait,
			};

			let wait = wait.max(Self::MIN_WAIT);

			waited_since.get_or_insert_with(|| self.clock.now());
			obs::limiter_waiting(wait, history.len());

			self.gate.released.wait_for(&mut history, wait);
		}
	}

	/// Trims expired entries and appends `now` if capacity remains; otherwise returns the time
	/// until the oldest entry expires.
	///
	/// Trimming uses the same `now`, so a full history always yields a positive wait. When the
	/// expiry instant is not representable the wait is [`Duration::MAX`].
	fn admit(&self, history: &mut VecDeque<Instant>) -> Result<Instant, Duration> {
		let now = self.clock.now();

		self.trim(history, now);

		if history.len() < self.limit {
			history.push_back(now);

			return Ok(now);
		}

		let oldest = history.front().copied().unwrap_or(now);

		match oldest.checked_add(self.window) {
			Some(expiry) => Err(expiry.saturating_duration_since(now)),
			None => Err(Duration::MAX),
		}
	}

	fn trim(&self, history: &mut VecDeque<Instant>, now: Instant) {
		while history
			.front()
			.is_some_and(|&stamp| now.saturating_duration_since(stamp) >= self.window)
		{
			history.pop_front();
		}
	}
}
impl RateLimiter for SlidingWindowLimiter {
	fn acquire(&self, cancel: &CancellationToken) -> Result<Instant> {
		SlidingWindowLimiter::acquire(self, cancel)
	}
}
impl Debug for SlidingWindowLimiter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SlidingWindowLimiter")
			.field("window", &self.window)
			.field("limit", &self.limit)
			.field("clock", &self.clock)
			.finish()
	}
}
