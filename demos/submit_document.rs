//! Demonstrates submitting introduce-goods documents from several threads through one
//! rate-limited submitter backed by the default reqwest transport.

// std
use std::{sync::Arc, thread, time::Instant};
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use crpt_api::{
	auth::{TokenCredential, TokenProvider},
	document::{Document, Product},
	error::TokenError,
	http::ReqwestTransport,
	limiter::TimeUnit,
	submit::DocumentSubmitter,
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start();
	let create_mock = server.mock(|when, then| {
		when.method(POST).path("/api/v3/lk/documents/create").query_param("pg", "milk");
		then.status(200)
			.header("content-type", "application/json")
			.body("{\"value\":\"11111111-2222-3333-4444-555555555555\"}");
	});
	let provider: Arc<dyn TokenProvider> =
		Arc::new(|| Ok::<_, TokenError>(TokenCredential::new("demo-token")));
	let submitter = Arc::new(
		DocumentSubmitter::builder()
			.base_url(Url::parse(&server.url("/api/v3"))?)
			.window(TimeUnit::Seconds.as_duration())
			.limit(3)
			.token_provider(provider)
			.transport(Arc::new(ReqwestTransport::new()?))
			.build()?,
	);
	let started = Instant::now();
	let handles = (0..6)
		.map(|n| {
			let submitter = submitter.clone();

			thread::spawn(move || {
				let product = Product::default()
					.with_tnved_code("0401")
					.with_uit_code(format!("0104600000000000{n:02}"));
				let document =
					Document::new("1234567890", "1234567890", "2025-08-25", "OWN_PRODUCTION")
						.with_product(product);

				submitter.submit(&document, "demo-signature", "milk")
			})
		})
		.collect::<Vec<_>>();

	for handle in handles {
		let id = handle
			.join()
			.map_err(|_| color_eyre::eyre::eyre!("Submitter thread panicked."))??;

		println!("Registered {id} after {:?}.", started.elapsed());
	}

	create_mock.assert_calls(6);

	Ok(())
}
