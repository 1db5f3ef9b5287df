//! Token provider contract consumed by the submitter.
//!
//! The crate never caches or refreshes credentials: it asks the provider once per submission and
//! forwards whatever comes back. Closures returning `Result<TokenCredential, TokenError>` satisfy
//! the contract directly.

// self
use crate::{_prelude::*, auth::TokenCredential, error::TokenError};

/// Supplies the current authentication credential on demand.
pub trait TokenProvider
where
	Self: Send + Sync,
{
	/// Returns the credential to attach to the next request.
	fn token(&self) -> Result<TokenCredential, TokenError>;
}
impl<F> TokenProvider for F
where
	F: Fn() -> Result<TokenCredential, TokenError> + Send + Sync,
{
	fn token(&self) -> Result<TokenCredential, TokenError> {
		self()
	}
}

/// Provider that always hands out the same credential.
#[derive(Clone, Debug)]
pub struct StaticTokenProvider(TokenCredential);
impl StaticTokenProvider {
	/// Creates a provider around a fixed credential.
	pub fn new(token: impl Into<TokenCredential>) -> Self {
		Self(token.into())
	}
}
impl TokenProvider for StaticTokenProvider {
	fn token(&self) -> Result<TokenCredential, TokenError> {
		Ok(self.0.clone())
	}
}
