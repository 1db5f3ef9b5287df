// self
use crate::_prelude::*;

/// A span builder used around synchronous submission stages.
#[derive(Clone, Debug)]
pub struct SubmitSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl SubmitSpan {
	/// Creates a new span tagged with the call stage and product group.
	pub fn new(stage: &'static str, product_group: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("crpt_api.submit", stage, product_group);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, product_group);

			Self {}
		}
	}

	/// Enters the span until the returned guard drops.
	pub fn entered(self) -> SubmitSpanGuard {
		#[cfg(feature = "tracing")]
		{
			SubmitSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			SubmitSpanGuard {}
		}
	}
}

/// RAII guard returned by [`SubmitSpan::entered`].
pub struct SubmitSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for SubmitSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("SubmitSpanGuard(..)")
	}
}

/// Emits a debug event before a caller parks in the limiter.
pub fn limiter_waiting(wait: Duration, in_window: usize) {
	#[cfg(feature = "tracing")]
	tracing::debug!(?wait, in_window, "rate limit reached; waiting");
	#[cfg(not(feature = "tracing"))]
	let _ = (wait, in_window);
}

/// Emits a debug event once a caller is admitted.
pub fn limiter_admitted(limit: usize) {
	#[cfg(feature = "tracing")]
	tracing::debug!(limit, "admission slot reserved");
	#[cfg(not(feature = "tracing"))]
	let _ = limit;
}

/// Emits a debug event when a wait is abandoned through its cancellation token.
pub fn limiter_cancelled(limit: usize) {
	#[cfg(feature = "tracing")]
	tracing::debug!(limit, "admission wait cancelled");
	#[cfg(not(feature = "tracing"))]
	let _ = limit;
}

/// Emits a warning for non-2xx registration responses.
pub fn submission_rejected(status: u16, body: &str) {
	#[cfg(feature = "tracing")]
	tracing::warn!(status, body, "registration endpoint rejected the document");
	#[cfg(not(feature = "tracing"))]
	let _ = (status, body);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn submit_span_noop_without_tracing() {
		let _guard = SubmitSpan::new("test", "milk").entered();

		limiter_waiting(Duration::from_millis(1), 3);
		limiter_admitted(3);
		limiter_cancelled(3);
		submission_rejected(500, "internal error");
	}

	#[test]
	fn unbounded_waits_are_logged_as_is() {
		limiter_waiting(Duration::MAX, 1);
	}
}
