//! Rate-limited client for the CRPT document-registration API: every submission passes a
//! sliding-window admission gate before it reaches the wire, no matter how many threads share
//! the client.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod clock;
pub mod document;
pub mod error;
pub mod http;
pub mod limiter;
pub mod obs;
pub mod submit;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use std::thread;

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{StaticTokenProvider, TokenProvider},
		clock::{Clock, ManualClock},
		document::{Document, Product},
		error::TransportError,
		http::{Transport, TransportRequest, TransportResponse},
		submit::DocumentSubmitter,
	};

	/// Scripted response returned by a [`RecordingTransport`].
	#[derive(Clone, Debug)]
	pub enum ScriptedReply {
		/// Respond with the provided status and body.
		Respond {
			/// HTTP status code.
			status: u16,
			/// Raw response body.
			body: String,
		},
		/// Fail with a network-level transport error.
		Unreachable,
	}

	/// In-process [`Transport`] that records every request and replays a scripted reply.
	#[derive(Clone, Debug)]
	pub struct RecordingTransport {
		reply: ScriptedReply,
		requests: Arc<Mutex<Vec<TransportRequest>>>,
	}
	impl RecordingTransport {
		/// Replies with the given status + body to every request.
		pub fn respond(status: u16, body: impl Into<String>) -> Self {
			Self::scripted(ScriptedReply::Respond { status, body: body.into() })
		}

		/// Fails every request with [`TransportError::Network`].
		pub fn unreachable() -> Self {
			Self::scripted(ScriptedReply::Unreachable)
		}

		fn scripted(reply: ScriptedReply) -> Self {
			Self { reply, requests: Default::default() }
		}

		/// Returns a snapshot of the requests received so far.
		pub fn requests(&self) -> Vec<TransportRequest> {
			self.requests.lock().clone()
		}

		/// Returns how many times [`Transport::post`] was invoked.
		pub fn calls(&self) -> usize {
			self.requests.lock().len()
		}
	}
	impl Transport for RecordingTransport {
		fn post(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
			self.requests.lock().push(request);

			match &self.reply {
				ScriptedReply::Respond { status, body } =>
					Ok(TransportResponse::new(*status, body.as_bytes().to_vec())),
				ScriptedReply::Unreachable => Err(TransportError::network(std::io::Error::new(
					std::io::ErrorKind::ConnectionRefused,
					"registration endpoint unreachable",
				))),
			}
		}
	}

	/// Builds the smallest document the registration API accepts: one product carrying a unit
	/// code.
	pub fn minimal_document() -> Document {
		Document::new("1234567890", "1234567890", "2025-08-25", "OWN_PRODUCTION").with_product(
			Product::default()
				.with_owner_inn("1234567890")
				.with_producer_inn("1234567890")
				.with_production_date("2025-08-25")
				.with_tnved_code("00000000")
				.with_uit_code("00000000000000000000000000000000000000000000000000"),
		)
	}

	/// Builds a submitter that talks to `transport`, uses a static `"token"` credential, and
	/// shares the provided clock with its limiter.
	pub fn build_test_submitter(
		transport: RecordingTransport,
		window: Duration,
		limit: usize,
		clock: Arc<dyn Clock>,
	) -> DocumentSubmitter {
		let provider: Arc<dyn TokenProvider> = Arc::new(StaticTokenProvider::new("token"));

		DocumentSubmitter::builder()
			.base_url(
				Url::parse("https://registry.test/api/v3")
					.expect("Test base URL should always parse."),
			)
			.window(window)
			.limit(limit)
			.clock(clock)
			.token_provider(provider)
			.transport(Arc::new(transport))
			.build()
			.expect("Test submitter should build successfully.")
	}

	/// Returns a manual clock pinned to the current instant.
	pub fn manual_clock() -> (ManualClock, Arc<dyn Clock>) {
		let clock = ManualClock::new(std::time::Instant::now());
		let shared: Arc<dyn Clock> = Arc::new(clock.clone());

		(clock, shared)
	}
}

mod _prelude {
	pub use std::{
		collections::VecDeque,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
		time::{Duration, Instant},
	};

	pub use parking_lot::{Condvar, Mutex};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Error as ReqwestError, blocking::Client as ReqwestClient};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
