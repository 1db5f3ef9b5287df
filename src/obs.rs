//! Optional observability hooks for submissions and limiter waits.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit `crpt_api.submit` spans with `stage` + `product_group` fields and
//!   `debug` events whenever the limiter parks or admits a caller.
//! - Enable `metrics` to increment `crpt_api_submit_total` (labeled by `outcome`) and record
//!   blocked admission time in the `crpt_api_limiter_wait_seconds` histogram.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubmitOutcome {
	/// Entry to [`DocumentSubmitter::submit`](crate::submit::DocumentSubmitter::submit).
	Attempt,
	/// A document identifier was returned.
	Success,
	/// The remote side answered, but not with an identifier.
	Rejected,
	/// Failure before a response was interpreted (arguments, limiter, collaborators).
	Failure,
}
impl SubmitOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SubmitOutcome::Attempt => "attempt",
			SubmitOutcome::Success => "success",
			SubmitOutcome::Rejected => "rejected",
			SubmitOutcome::Failure => "failure",
		}
	}

	/// Classifies a finished submission.
	pub fn of<T>(result: &Result<T>) -> Self {
		match result {
			Ok(_) => SubmitOutcome::Success,
			Err(Error::Http { .. } | Error::Protocol(_)) => SubmitOutcome::Rejected,
			Err(_) => SubmitOutcome::Failure,
		}
	}
}
impl Display for SubmitOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
