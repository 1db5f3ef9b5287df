// self
use crate::{_prelude::*, obs::SubmitOutcome};

/// Records a submission outcome via the global metrics recorder (when enabled).
pub fn record_submit_outcome(outcome: SubmitOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("crpt_api_submit_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Records how long a caller stayed blocked in the limiter before admission.
pub fn record_limiter_wait(waited: Duration) {
	#[cfg(feature = "metrics")]
	{
		metrics::histogram!("crpt_api_limiter_wait_seconds").record(waited.as_secs_f64());
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = waited;
	}
}
