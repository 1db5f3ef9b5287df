//! Submission orchestration: one rate-limited, authenticated POST per document.
//!
//! [`DocumentSubmitter::submit`] checks local preconditions, reserves a limiter slot (blocking
//! when the window is full), encodes the [`Envelope`], fetches a fresh credential, and makes
//! exactly one transport call. Nothing is retried here; the slot is spent on the attempt, not on
//! its success, so callers may safely retry the whole submission.

pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	auth::TokenProvider,
	document::{Created, Document, DocumentId, Envelope},
	error::{ArgumentError, ProtocolError},
	http::{Transport, TransportRequest, TransportResponse},
	limiter::{CancellationToken, RateLimiter},
	obs::{self, SubmitOutcome, SubmitSpan},
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestTransport, limiter::TimeUnit};

/// Rate-limited client for the document-creation endpoint.
///
/// Cheap to share: wrap it in an [`Arc`] and call [`submit`](Self::submit) from as many threads
/// as needed. All of them draw from the same limiter.
pub struct DocumentSubmitter {
	endpoint: Url,
	limiter: Arc<dyn RateLimiter>,
	token_provider: Arc<dyn TokenProvider>,
	transport: Arc<dyn Transport>,
}
impl DocumentSubmitter {
	/// Production API root used when no base URL is configured.
	pub const DEFAULT_BASE_URL: &'static str = "https://ismp.crpt.ru/api/v3";
	/// Path segments appended to the base URL.
	pub const CREATE_PATH: [&'static str; 3] = ["lk", "documents", "create"];
	/// Maximum number of characters of a malformed body kept in [`ProtocolError`].
	pub const BODY_PREVIEW_LIMIT: usize = 256;

	/// Returns a builder with production defaults.
	pub fn builder() -> DocumentSubmitterBuilder {
		DocumentSubmitterBuilder::new()
	}

	/// Creates a submitter for the production API that admits `limit` requests per `unit`.
	#[cfg(feature = "reqwest")]
	pub fn new(
		unit: TimeUnit,
		limit: usize,
		token_provider: Arc<dyn TokenProvider>,
	) -> Result<Self> {
		Self::builder()
			.window(unit.as_duration())
			.limit(limit)
			.token_provider(token_provider)
			.transport(Arc::new(ReqwestTransport::new()?))
			.build()
	}

	/// Absolute URL of the document-creation endpoint (without the product-group query).
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// Limiter shared by every submission made through this instance.
	pub fn limiter(&self) -> &Arc<dyn RateLimiter> {
		&self.limiter
	}

	/// Registers `document` and returns the identifier the registry assigned.
	///
	/// Blocks while the rate-limit window is full; use
	/// [`submit_with_cancel`](Self::submit_with_cancel) to bound that wait.
	pub fn submit(
		&self,
		document: &Document,
		signature: &str,
		product_group: &str,
	) -> Result<DocumentId> {
		self.submit_with_cancel(document, signature, product_group, &CancellationToken::never())
	}

	/// Same as [`submit`](Self::submit), but the limiter wait aborts with [`Error::Cancelled`]
	/// once `cancel` fires. A cancelled submission consumes no slot and makes no calls.
	pub fn submit_with_cancel(
		&self,
		document: &Document,
		signature: &str,
		product_group: &str,
		cancel: &CancellationToken,
	) -> Result<DocumentId> {
		let _span = SubmitSpan::new("submit", product_group).entered();

		obs::record_submit_outcome(SubmitOutcome::Attempt);

		let result = self.submit_once(document, signature, product_group, cancel);

		obs::record_submit_outcome(SubmitOutcome::of(&result));

		result
	}

	fn submit_once(
		&self,
		document: &Document,
		signature: &str,
		product_group: &str,
		cancel: &CancellationToken,
	) -> Result<DocumentId> {
		check_preconditions(document, signature, product_group)?;

		self.limiter.acquire(cancel)?;

		let envelope = Envelope::introduce_goods(document, signature, product_group)
			.map_err(ProtocolError::Encode)?;
		let body = serde_json::to_vec(&envelope).map_err(ProtocolError::Encode)?;
		let token = self.token_provider.token()?;
		let mut url = self.endpoint.clone();

		url.query_pairs_mut().append_pair("pg", product_group);

		let request = TransportRequest::new(url, body)
			.with_header("Content-Type", "application/json")
			.with_header("Accept", "application/json")
			.with_header("Authorization", token.bearer());
		let response = self.transport.post(request)?;

		interpret(response)
	}
}
impl Debug for DocumentSubmitter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DocumentSubmitter")
			.field("endpoint", &self.endpoint.as_str())
			.field("limiter", &self.limiter)
			.finish()
	}
}

fn check_preconditions(
	document: &Document,
	signature: &str,
	product_group: &str,
) -> Result<(), ArgumentError> {
	if document.products.is_empty() {
		return Err(ArgumentError::EmptyProducts);
	}
	if signature.is_empty() {
		return Err(ArgumentError::Empty { name: "signature" });
	}
	if product_group.is_empty() {
		return Err(ArgumentError::Empty { name: "product_group" });
	}

	Ok(())
}

fn interpret(response: TransportResponse) -> Result<DocumentId> {
	let status = response.status;

	if !response.is_success() {
		let body = response.body_text();

		obs::submission_rejected(status, &body);

		return Err(Error::Http { status, body });
	}

	let mut de = serde_json::Deserializer::from_slice(&response.body);
	let created: Created = serde_path_to_error::deserialize(&mut de).map_err(|source| {
		ProtocolError::MalformedBody { source, status, preview: preview(&response.body_text()) }
	})?;

	Ok(created.value)
}

fn preview(body: &str) -> String {
	if body.chars().count() <= DocumentSubmitter::BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = body.chars().take(DocumentSubmitter::BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// crates.io
	use base64::{Engine, engine::general_purpose::STANDARD};
	use serde_json::Value;
	// self
	use super::*;
	use crate::{
		_preludet::*,
		auth::TokenCredential,
		document::Product,
		error::{TokenError, TransportError},
		limiter::SlidingWindowLimiter,
	};

	const DOCUMENT_ID: &str = "11111111-2222-3333-4444-555555555555";

	fn created_body() -> String {
		format!("{{\"value\":\"{DOCUMENT_ID}\"}}")
	}

	fn submitter(transport: &RecordingTransport) -> DocumentSubmitter {
		let (_clock, shared) = manual_clock();

		build_test_submitter(transport.clone(), Duration::from_secs(1), 10, shared)
	}

	#[test]
	fn submit_returns_registered_identifier() {
		let transport = RecordingTransport::respond(200, created_body());
		let document = minimal_document();
		let id = submitter(&transport)
			.submit(&document, "SIG", "milk")
			.expect("Submission should succeed.");

		assert_eq!(id.as_str(), DOCUMENT_ID);
		assert_eq!(transport.calls(), 1);

		let request = transport.requests().remove(0);

		assert_eq!(
			request.url.as_str(),
			"https://registry.test/api/v3/lk/documents/create?pg=milk"
		);
		assert_eq!(request.header("authorization"), Some("Bearer token"));
		assert_eq!(request.header("content-type"), Some("application/json"));

		let envelope: Value =
			serde_json::from_slice(&request.body).expect("Request body should be JSON.");
		let encoded = envelope["product_document"].as_str().expect("Document is a string.");
		let decoded: Value = serde_json::from_slice(
			&STANDARD.decode(encoded).expect("Document should be base64 encoded."),
		)
		.expect("Decoded document should be JSON.");

		assert_eq!(envelope["signature"], "SIG");
		assert_eq!(envelope["product_group"], "milk");
		assert_eq!(envelope["type"], Envelope::INTRODUCE_GOODS);
		assert_eq!(decoded, serde_json::to_value(&document).expect("Document serializes."));
		assert!(decoded["products"][0].get("certificate_document").is_none());
		assert!(decoded["products"][0].get("uitu_code").is_none());
	}

	#[test]
	fn non_success_status_is_not_retried() {
		let transport = RecordingTransport::respond(500, "internal error");
		let err = submitter(&transport)
			.submit(&minimal_document(), "SIG", "milk")
			.expect_err("HTTP 500 must fail.");

		assert!(matches!(err, Error::Http { status: 500, ref body } if body == "internal error"));
		assert_eq!(transport.calls(), 1, "Submitter must not retry.");
	}

	#[test]
	fn missing_identifier_is_a_protocol_error() {
		let transport = RecordingTransport::respond(200, "{}");
		let err = submitter(&transport)
			.submit(&minimal_document(), "SIG", "milk")
			.expect_err("Empty object must fail.");

		assert!(matches!(err, Error::Protocol(ProtocolError::MalformedBody { status: 200, .. })));
		assert_eq!(err.status(), Some(200));
	}

	#[test]
	fn token_failures_propagate_after_admission() {
		let (_clock, shared_clock) = manual_clock();
		let limiter = Arc::new(
			SlidingWindowLimiter::with_clock(Duration::from_secs(1), 5, shared_clock)
				.expect("Limiter should build."),
		);
		let calls = Arc::new(AtomicUsize::new(0));
		let provider: Arc<dyn TokenProvider> = {
			let calls = calls.clone();

			Arc::new(move || -> Result<TokenCredential, TokenError> {
				calls.fetch_add(1, Ordering::SeqCst);

				Err(TokenError::new("credential store offline"))
			})
		};
		let transport = RecordingTransport::respond(200, "{}");
		let submitter = DocumentSubmitter::builder()
			.limiter(limiter.clone())
			.token_provider(provider)
			.transport(Arc::new(transport.clone()))
			.build()
			.expect("Submitter should build.");
		let err = submitter
			.submit(&minimal_document(), "SIG", "milk")
			.expect_err("Token failure must propagate.");

		assert!(matches!(err, Error::Token(_)));
		assert!(err.is_collaborator());
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(transport.calls(), 0);
		assert_eq!(limiter.admitted_in_window(), 1, "The attempt consumes its slot.");
	}

	#[test]
	fn transport_failures_propagate_unchanged() {
		let transport = RecordingTransport::unreachable();
		let err = submitter(&transport)
			.submit(&minimal_document(), "SIG", "milk")
			.expect_err("Transport failure must propagate.");

		assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
		assert_eq!(transport.calls(), 1);
	}

	#[test]
	fn invalid_arguments_consume_no_slot() {
		let transport = RecordingTransport::respond(200, "{}");
		let submitter = submitter(&transport);
		let bare = Document::new("1", "1", "2025-08-25", "OWN_PRODUCTION");

		assert!(matches!(
			submitter.submit(&bare, "SIG", "milk"),
			Err(Error::InvalidArgument(ArgumentError::EmptyProducts))
		));
		assert!(matches!(
			submitter.submit(&minimal_document(), "", "milk"),
			Err(Error::InvalidArgument(ArgumentError::Empty { name: "signature" }))
		));
		assert_eq!(transport.calls(), 0);
	}

	#[test]
	fn cancelled_submission_makes_no_calls() {
		let transport = RecordingTransport::respond(200, created_body());
		let (_clock, shared) = manual_clock();
		let submitter = build_test_submitter(transport.clone(), Duration::from_secs(30), 1, shared);
		let cancel = CancellationToken::new();

		submitter.submit(&minimal_document(), "SIG", "milk").expect("First submission fits.");
		cancel.cancel();

		let err = submitter
			.submit_with_cancel(&minimal_document(), "SIG", "milk", &cancel)
			.expect_err("Cancelled submission must fail.");

		assert!(matches!(err, Error::Cancelled));
		assert_eq!(transport.calls(), 1);
	}

	#[test]
	fn submitters_can_share_one_limiter() {
		let (clock, shared_clock) = manual_clock();
		let limiter: Arc<dyn RateLimiter> = Arc::new(
			SlidingWindowLimiter::with_clock(Duration::from_secs(1), 2, shared_clock)
				.expect("Limiter should build."),
		);
		let transport = RecordingTransport::respond(200, created_body());
		let build = || {
			DocumentSubmitter::builder()
				.limiter(limiter.clone())
				.token_provider(Arc::new(crate::auth::StaticTokenProvider::new("token")))
				.transport(Arc::new(transport.clone()))
				.build()
				.expect("Submitter should build.")
		};
		let (first, second) = (build(), build());

		first.submit(&minimal_document(), "SIG", "milk").expect("Slot 1 is free.");
		second.submit(&minimal_document(), "SIG", "milk").expect("Slot 2 is free.");

		let waiter = {
			let cancel = CancellationToken::new();
			let trigger = cancel.clone();
			let handle = thread::spawn(move || {
				second.submit_with_cancel(&minimal_document(), "SIG", "milk", &cancel)
			});

			thread::sleep(Duration::from_millis(50));
			trigger.cancel();

			handle
		};

		assert!(matches!(waiter.join().expect("Waiter should not panic."), Err(Error::Cancelled)));

		clock.advance(Duration::from_secs(1));

		first.submit(&minimal_document(), "SIG", "milk").expect("Window has moved on.");

		assert_eq!(transport.calls(), 3);
	}

	#[test]
	fn preconditions_reject_empty_inputs() {
		let empty = Document::new("1", "1", "2025-08-25", "OWN_PRODUCTION");
		let full = empty.clone().with_product(Product::default().with_uit_code("U-1"));

		assert!(matches!(
			check_preconditions(&empty, "SIG", "milk"),
			Err(ArgumentError::EmptyProducts)
		));
		assert!(matches!(
			check_preconditions(&full, "", "milk"),
			Err(ArgumentError::Empty { name: "signature" })
		));
		assert!(matches!(
			check_preconditions(&full, "SIG", ""),
			Err(ArgumentError::Empty { name: "product_group" })
		));
		assert!(check_preconditions(&full, "SIG", "milk").is_ok());
	}

	#[test]
	fn interpret_maps_statuses() {
		let ok = interpret(TransportResponse::new(201, b"{\"value\":\"doc-1\"}".to_vec()))
			.expect("2xx with a value should succeed.");

		assert_eq!(ok.as_str(), "doc-1");

		let err = interpret(TransportResponse::new(404, b"missing".to_vec()))
			.expect_err("Non-2xx must fail.");

		assert!(matches!(err, Error::Http { status: 404, ref body } if body == "missing"));

		let err = interpret(TransportResponse::new(200, b"not json".to_vec()))
			.expect_err("Unparseable body must fail.");

		assert!(matches!(err, Error::Protocol(ProtocolError::MalformedBody { status: 200, .. })));
	}

	#[test]
	fn malformed_body_reports_field_path() {
		let err = interpret(TransportResponse::new(200, b"{\"value\":42}".to_vec()))
			.expect_err("Non-string identifiers must fail.");

		match err {
			Error::Protocol(ProtocolError::MalformedBody { source, .. }) =>
				assert_eq!(source.path().to_string(), "value"),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn previews_are_truncated() {
		let long = "x".repeat(DocumentSubmitter::BODY_PREVIEW_LIMIT + 10);
		let short = preview(&long);

		assert_eq!(short.chars().count(), DocumentSubmitter::BODY_PREVIEW_LIMIT + 1);
		assert!(short.ends_with('…'));
		assert_eq!(preview("{}"), "{}");
	}
}
