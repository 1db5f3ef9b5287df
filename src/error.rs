//! Crate-level error types shared by the limiter, the submitter, and its collaborators.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Construction-time misuse or a violated call precondition.
	#[error(transparent)]
	InvalidArgument(#[from] ArgumentError),
	/// An admission wait was aborted through its cancellation token.
	#[error("Waiting for a rate-limit slot was cancelled.")]
	Cancelled,
	/// The token provider failed to supply a credential.
	#[error(transparent)]
	Token(#[from] TokenError),
	/// The transport failed before an HTTP status was available.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The registration endpoint answered with a non-2xx status.
	#[error("Registration endpoint returned HTTP {status}.")]
	Http {
		/// HTTP status code returned upstream.
		status: u16,
		/// Raw response body, kept for diagnostics.
		body: String,
	},
	/// A 2xx response did not carry a usable document identifier.
	#[error(transparent)]
	Protocol(#[from] ProtocolError),
}
impl Error {
	/// Returns `true` when the failure originated in a collaborator (token provider or
	/// transport) rather than in this crate or the remote contract.
	pub fn is_collaborator(&self) -> bool {
		matches!(self, Self::Token(_) | Self::Transport(_))
	}

	/// Returns the HTTP status attached to the failure, when one was observed.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Http { status, .. } => Some(*status),
			Self::Protocol(ProtocolError::MalformedBody { status, .. }) => Some(*status),
			_ => None,
		}
	}
}

/// Argument and configuration failures; fatal to the call that raised them.
#[derive(Debug, ThisError)]
pub enum ArgumentError {
	/// Sliding window must span a positive duration.
	#[error("Rate-limit window must be greater than zero.")]
	ZeroWindow,
	/// At least one admission per window must be allowed.
	#[error("Rate-limit request limit must be greater than zero.")]
	ZeroLimit,
	/// A required collaborator was never supplied to the builder.
	#[error("Missing required dependency `{name}`.")]
	MissingDependency {
		/// Builder field that was left unset.
		name: &'static str,
	},
	/// Base URL cannot carry additional path segments.
	#[error("Base URL `{url}` cannot be used as an API root.")]
	InvalidBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Documents must list at least one product.
	#[error("Document must contain at least one product.")]
	EmptyProducts,
	/// A required string argument was empty.
	#[error("Argument `{name}` must not be empty.")]
	Empty {
		/// Argument name.
		name: &'static str,
	},
}
impl ArgumentError {
	/// Wraps a transport's builder failure inside [`ArgumentError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ArgumentError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failure reported by a [`TokenProvider`](crate::auth::TokenProvider).
#[derive(Debug, ThisError)]
#[error("Token provider failed to supply a credential.")]
pub struct TokenError {
	#[source]
	source: BoxError,
}
impl TokenError {
	/// Wraps a provider-specific failure.
	pub fn new(src: impl Into<BoxError>) -> Self {
		Self { source: src.into() }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the registration endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the registration endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Remote-contract violations found in otherwise successful responses.
#[derive(Debug, ThisError)]
pub enum ProtocolError {
	/// Response body was not JSON or lacked a valid `value` identifier.
	#[error("Registration endpoint returned an unusable body (HTTP {status}): {preview}.")]
	MalformedBody {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
		/// Leading slice of the body for diagnostics.
		preview: String,
	},
	/// Request envelope could not be serialized.
	#[error("Request envelope could not be serialized.")]
	Encode(#[source] serde_json::Error),
}
