//! Redacting wrapper for bearer credentials.

// self
use crate::_prelude::*;

/// Opaque bearer credential fetched once per submission; never logged in clear text.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCredential(String);
impl TokenCredential {
	/// Wraps a new credential string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner credential. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Formats the credential as an `Authorization` header value.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.0)
	}
}
impl AsRef<str> for TokenCredential {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<String> for TokenCredential {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for TokenCredential {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Debug for TokenCredential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenCredential").field(&"<redacted>").finish()
	}
}
impl Display for TokenCredential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
