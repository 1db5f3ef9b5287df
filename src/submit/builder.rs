//! Builder for [`DocumentSubmitter`] values.

// self
use crate::{
	_prelude::*,
	auth::TokenProvider,
	clock::{Clock, SystemClock},
	error::ArgumentError,
	http::Transport,
	limiter::{RateLimiter, SlidingWindowLimiter},
	submit::DocumentSubmitter,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Builder for [`DocumentSubmitter`] values.
///
/// Either configure `window` + `limit` (a private [`SlidingWindowLimiter`] is created at build
/// time) or hand over a shared [`RateLimiter`] so several submitters draw from one budget.
pub struct DocumentSubmitterBuilder {
	/// API root; the document-creation path is appended to it.
	pub base_url: Option<Url>,
	/// Sliding window length for the private limiter.
	pub window: Duration,
	/// Admissions per window for the private limiter.
	pub limit: usize,
	/// Shared limiter that overrides `window` + `limit`.
	pub limiter: Option<Arc<dyn RateLimiter>>,
	/// Clock used by the private limiter.
	pub clock: Arc<dyn Clock>,
	/// Credential source (required).
	pub token_provider: Option<Arc<dyn TokenProvider>>,
	/// HTTP transport; defaults to [`ReqwestTransport`] when the `reqwest` feature is enabled.
	pub transport: Option<Arc<dyn Transport>>,
}
impl DocumentSubmitterBuilder {
	/// Default window length.
	pub const DEFAULT_WINDOW: Duration = Duration::from_secs(1);
	/// Default admissions per window.
	pub const DEFAULT_LIMIT: usize = 10;

	/// Creates a builder with production defaults.
	pub fn new() -> Self {
		Self {
			base_url: None,
			window: Self::DEFAULT_WINDOW,
			limit: Self::DEFAULT_LIMIT,
			limiter: None,
			clock: Arc::new(SystemClock),
			token_provider: None,
			transport: None,
		}
	}

	/// Overrides the API root.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Sets the sliding window length.
	pub fn window(mut self, window: Duration) -> Self {
		self.window = window;

		self
	}

	/// Sets the number of admissions allowed per window.
	pub fn limit(mut self, limit: usize) -> Self {
		self.limit = limit;

		self
	}

	/// Shares an existing limiter instead of creating a private one.
	pub fn limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
		self.limiter = Some(limiter);

		self
	}

	/// Overrides the clock of the private limiter.
	pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}

	/// Sets the credential source.
	pub fn token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
		self.token_provider = Some(provider);

		self
	}

	/// Sets the HTTP transport.
	pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
		self.transport = Some(transport);

		self
	}

	/// Validates the configuration and builds the submitter.
	pub fn build(self) -> Result<DocumentSubmitter> {
		let token_provider = self
			.token_provider
			.ok_or(ArgumentError::MissingDependency { name: "token_provider" })?;
		let transport = match self.transport {
			Some(transport) => transport,
			None => default_transport()?,
		};
		let limiter = match self.limiter {
			Some(limiter) => limiter,
			None =>
				Arc::new(SlidingWindowLimiter::with_clock(self.window, self.limit, self.clock)?),
		};
		let endpoint = endpoint_for(self.base_url)?;

		Ok(DocumentSubmitter { endpoint, limiter, token_provider, transport })
	}
}
impl Default for DocumentSubmitterBuilder {
	fn default() -> Self {
		Self::new()
	}
}
impl Debug for DocumentSubmitterBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DocumentSubmitterBuilder")
			.field("base_url", &self.base_url.as_ref().map(Url::as_str))
			.field("window", &self.window)
			.field("limit", &self.limit)
			.field("shared_limiter", &self.limiter.is_some())
			.field("token_provider_set", &self.token_provider.is_some())
			.field("transport_set", &self.transport.is_some())
			.finish()
	}
}

#[cfg(feature = "reqwest")]
fn default_transport() -> Result<Arc<dyn Transport>> {
	Ok(Arc::new(ReqwestTransport::new()?))
}

#[cfg(not(feature = "reqwest"))]
fn default_transport() -> Result<Arc<dyn Transport>> {
	Err(ArgumentError::MissingDependency { name: "transport" }.into())
}

fn endpoint_for(base_url: Option<Url>) -> Result<Url, ArgumentError> {
	let mut url = match base_url {
		Some(url) => url,
		None => Url::parse(DocumentSubmitter::DEFAULT_BASE_URL).map_err(|_| {
			ArgumentError::InvalidBaseUrl { url: DocumentSubmitter::DEFAULT_BASE_URL.into() }
		})?,
	};
	let raw = url.to_string();

	url.set_query(None);
	url.set_fragment(None);
	url.path_segments_mut()
		.map_err(|_| ArgumentError::InvalidBaseUrl { url: raw })?
		.pop_if_empty()
		.extend(DocumentSubmitter::CREATE_PATH);

	Ok(url)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::RecordingTransport, auth::StaticTokenProvider};

	fn provider() -> Arc<dyn TokenProvider> {
		Arc::new(StaticTokenProvider::new("token"))
	}

	#[test]
	fn endpoint_appends_create_path() {
		let url = |raw: &str| Url::parse(raw).expect("Fixture URL should parse.");

		assert_eq!(
			endpoint_for(None).expect("Default base URL is valid.").as_str(),
			"https://ismp.crpt.ru/api/v3/lk/documents/create"
		);
		assert_eq!(
			endpoint_for(Some(url("http://127.0.0.1:8080/api/v3/?debug=1")))
				.expect("Trailing slash is tolerated.")
				.as_str(),
			"http://127.0.0.1:8080/api/v3/lk/documents/create"
		);
		assert!(matches!(
			endpoint_for(Some(url("mailto:ops@example.com"))),
			Err(ArgumentError::InvalidBaseUrl { .. })
		));
	}

	#[test]
	fn build_requires_token_provider() {
		let err = DocumentSubmitter::builder().build().expect_err("Token provider is mandatory.");

		assert!(matches!(
			err,
			Error::InvalidArgument(ArgumentError::MissingDependency { name: "token_provider" })
		));
	}

	#[test]
	fn build_rejects_zero_limit() {
		let err = DocumentSubmitterBuilder::default()
			.limit(0)
			.token_provider(provider())
			.transport(Arc::new(RecordingTransport::respond(200, "{}")))
			.build()
			.expect_err("Zero limit must be rejected.");

		assert!(matches!(err, Error::InvalidArgument(ArgumentError::ZeroLimit)));
	}
}
