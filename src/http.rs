//! Transport contract for the registration endpoint plus the default blocking reqwest adapter.
//!
//! The submitter depends only on [`Transport`]: one synchronous POST per call, returning the raw
//! status and body. Network failures surface as [`TransportError`]; HTTP-level outcomes are left
//! to the caller to interpret, so transports never need to understand the registry's payloads.

// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")] use crate::error::ArgumentError;

/// Synchronous HTTP POST capability.
///
/// Implementations must be `Send + Sync` so one transport can serve every thread sharing a
/// submitter. Retries, pooling, and TLS belong here rather than in the submitter.
pub trait Transport
where
	Self: Send + Sync,
{
	/// Sends `request` and returns the response status and body.
	fn post(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Fully assembled outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
	/// Absolute request URL including the query string.
	pub url: Url,
	/// Header name/value pairs in insertion order.
	pub headers: Vec<(String, String)>,
	/// Encoded request body.
	pub body: Vec<u8>,
}
impl TransportRequest {
	/// Creates a request without headers.
	pub fn new(url: Url, body: Vec<u8>) -> Self {
		Self { url, headers: Vec::new(), body }
	}

	/// Appends a header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Returns the first header value matching `name`, ignoring ASCII case.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Raw response returned by a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl TransportResponse {
	/// Creates a response from its parts.
	pub fn new(status: u16, body: Vec<u8>) -> Self {
		Self { status, body }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns the body decoded as UTF-8, replacing invalid sequences.
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Blocking reqwest client configured for the registry: bounded connect time and no redirects.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Connect timeout applied by [`ReqwestTransport::new`].
	pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

	/// Builds the default client.
	pub fn new() -> Result<Self, ArgumentError> {
		let client = ReqwestClient::builder()
			.connect_timeout(Self::CONNECT_TIMEOUT)
			.redirect(reqwest::redirect::Policy::none())
			.build()?;

		Ok(Self(client))
	}

	/// Wraps an existing blocking [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
	fn post(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
		let mut builder = self.0.post(request.url);

		for (name, value) in request.headers {
			builder = builder.header(name, value);
		}

		let response = builder.body(request.body).send()?;
		let status = response.status().as_u16();
		let body = response.bytes()?.to_vec();

		Ok(TransportResponse::new(status, body))
	}
}
